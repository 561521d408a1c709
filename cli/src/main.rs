//! LabelIQ from the terminal.
//!
//! ```bash
//! labeliq profile set --profession Pilot --allergy Peanuts
//! labeliq analyze-text "sugar, caffeine, peanut oil"
//! labeliq scan label.jpg
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use labeliq_core::domain::profile::{entities::Profession, value_objects::ProfileEdit};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{SessionSettings, analyze, profile};

#[derive(Parser)]
#[command(name = "labeliq")]
#[command(author, version, about = "Ingredient label analysis tailored to your health profile")]
struct Cli {
    /// Base URL of the analysis proxy
    #[arg(long, env = "LABELIQ_API_URL", default_value = "http://localhost:5000", global = true)]
    api_url: String,

    /// Directory holding the saved profile
    #[arg(long, env = "LABELIQ_DATA_DIR", default_value = ".labeliq", global = true)]
    data_dir: PathBuf,

    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or edit the saved health profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Analyze a typed or pasted ingredient list
    AnalyzeText {
        /// Ingredient list, e.g. "sugar, salt, E621"
        text: String,
    },
    /// Analyze a photo of an ingredient label
    Scan {
        /// JPEG image of the label
        image: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the saved profile
    Show,
    /// Edit and save the profile
    Set {
        #[arg(long)]
        profession: Option<String>,

        /// Toggle an allergy; repeat for several
        #[arg(long = "allergy")]
        allergies: Vec<String>,

        /// Comma separated medical conditions, replacing the current ones
        #[arg(long)]
        conditions: Option<String>,

        /// Replace the goals; repeat for several
        #[arg(long = "goal")]
        goals: Vec<String>,
    },
    /// List the professions and common allergies the editor offers
    Options,
}

fn init_logger(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("labeliq=warn,labeliq_core=warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logger(cli.log_json);

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), anyhow::Error> {
    let settings = SessionSettings {
        api_url: cli.api_url,
        data_dir: cli.data_dir,
    };

    match cli.command {
        Commands::Profile { action } => match action {
            ProfileAction::Show => profile::show(&settings).await?,
            ProfileAction::Set {
                profession,
                allergies,
                conditions,
                goals,
            } => {
                let mut edits: Vec<ProfileEdit> = allergies
                    .into_iter()
                    .map(ProfileEdit::ToggleAllergy)
                    .collect();
                if let Some(profession) = profession {
                    edits.push(ProfileEdit::SetProfession(Profession::from(profession)));
                }
                if let Some(conditions) = conditions {
                    edits.push(ProfileEdit::SetConditions(conditions));
                }
                if !goals.is_empty() {
                    edits.push(ProfileEdit::SetGoals(goals));
                }
                profile::set(&settings, edits).await?;
            }
            ProfileAction::Options => profile::options(),
        },
        Commands::AnalyzeText { text } => analyze::analyze_text(&settings, text).await?,
        Commands::Scan { image } => analyze::scan(&settings, image).await?,
    }

    Ok(())
}
