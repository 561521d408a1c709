use anyhow::bail;
use labeliq_core::domain::{
    orchestrator::entities::Action,
    profile::{
        entities::Profession,
        value_objects::{COMMON_ALLERGIES, ProfileEdit},
    },
};

use super::{SessionSettings, render::render_profile};

pub async fn show(settings: &SessionSettings) -> Result<(), anyhow::Error> {
    let session = settings.start(None).await;
    println!("{}", render_profile(session.orchestrator().profile()));
    Ok(())
}

pub async fn set(settings: &SessionSettings, edits: Vec<ProfileEdit>) -> Result<(), anyhow::Error> {
    let mut session = settings.start(None).await;

    session.dispatch(Action::OpenProfile).await;
    for edit in edits {
        session.dispatch(Action::EditProfile(edit)).await;
    }
    session.dispatch(Action::SaveProfile).await;

    if let Some(notice) = session.take_notice() {
        bail!(notice.message);
    }

    println!("{}", render_profile(session.orchestrator().profile()));
    Ok(())
}

pub fn options() {
    println!("Professions:");
    for profession in Profession::CATALOGUE {
        println!("  {}", profession);
    }
    println!("Common allergies:");
    for allergy in COMMON_ALLERGIES {
        println!("  {}", allergy);
    }
}
