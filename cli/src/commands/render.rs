use labeliq_core::domain::{
    analysis::entities::{IngredientAnalysis, RiskLevel, ScanResult, Verdict},
    profile::entities::UserProfile,
};

fn verdict_line(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Safe => "SAFE     Nothing here conflicts with your profile.",
        Verdict::Caution => "CAUTION  Some ingredients deserve a closer look.",
        Verdict::Avoid => "AVOID    This product conflicts with your profile.",
    }
}

fn list_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

pub fn render_result(result: &ScanResult) -> String {
    let mut out = String::new();

    if let Some(name) = &result.product_name {
        out.push_str(&format!("{}\n", name));
    }
    out.push_str(&format!(
        "{}\n\n{}\n\n",
        verdict_line(result.overall_verdict),
        result.summary
    ));
    out.push_str(&format!(
        "Ingredients: {} ({} high, {} medium, {} low)\n",
        result.ingredients.len(),
        result.count_by_risk(RiskLevel::High),
        result.count_by_risk(RiskLevel::Medium),
        result.count_by_risk(RiskLevel::Low),
    ));

    for ingredient in &result.ingredients {
        out.push_str(&render_ingredient(ingredient));
    }

    out
}

fn render_ingredient(ingredient: &IngredientAnalysis) -> String {
    let marker = if ingredient.is_flagged() { '!' } else { '-' };
    let technical = ingredient
        .technical_name
        .as_ref()
        .map(|t| format!(" ({})", t))
        .unwrap_or_default();

    let mut line = format!(
        "  {} {:<6} {}{}: {}\n",
        marker,
        ingredient.risk_level.as_str(),
        ingredient.name,
        technical,
        ingredient.purpose
    );
    if let Some(warning) = &ingredient.warning {
        line.push_str(&format!("           warning: {}\n", warning));
    }
    if let Some(note) = &ingredient.regulatory_note {
        line.push_str(&format!("           regulatory: {}\n", note));
    }
    line
}

pub fn render_profile(profile: &UserProfile) -> String {
    format!(
        "Profession: {}\nAllergies:  {}\nConditions: {}\nGoals:      {}",
        profile.profession(),
        list_or(profile.allergies(), "None"),
        list_or(profile.conditions(), "None"),
        list_or(profile.goals(), "General health"),
    )
}
