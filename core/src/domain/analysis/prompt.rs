use crate::domain::profile::entities::UserProfile;

const IMAGE_PROMPT_TEMPLATE: &str = "Extract ingredients from this image and provide a health/safety analysis.
{user_context}

Strictly follow the JSON schema. Use a calm, clinical tone. Avoid fear-mongering.
Flag ingredients that conflict with the user's allergies or profession (e.g., stimulants for pilots or certain banned substances for athletes).";

const TEXT_PROMPT_TEMPLATE: &str = "Analyze these ingredients: \"{input_content}\"
{user_context}

Follow the JSON schema. Neutral, clinical tone required.";

const NONE_LABEL: &str = "None";
const GENERAL_HEALTH_LABEL: &str = "General health";

/// Renders the profile as the "User Context" block of a prompt. Empty
/// collections are spelled out so the model never sees a blank line.
pub fn render_user_context(profile: &UserProfile) -> String {
    format!(
        "User Context:\n- Allergies: {}\n- Conditions: {}\n- Profession: {}\n- Goals: {}",
        join_or(profile.allergies(), NONE_LABEL),
        join_or(profile.conditions(), NONE_LABEL),
        profile.profession(),
        join_or(profile.goals(), GENERAL_HEALTH_LABEL),
    )
}

pub fn build_image_prompt(profile: &UserProfile) -> String {
    IMAGE_PROMPT_TEMPLATE.replace("{user_context}", &render_user_context(profile))
}

pub fn build_text_prompt(text: &str, profile: &UserProfile) -> String {
    TEXT_PROMPT_TEMPLATE
        .replace("{user_context}", &render_user_context(profile))
        .replace("{input_content}", text)
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}
