use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::profile::value_objects::{DEFAULT_GOAL, ProfileEdit};

/// Health context the analysis is tailored to.
///
/// Collections behave as sets: entries are trimmed, never duplicated and keep
/// insertion order, whether they come from an edit or a stored blob. Any
/// field missing from a stored or submitted blob reads back as an empty
/// collection, or `General` for the profession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "deduped_set")]
    allergies: Vec<String>,
    #[serde(default, deserialize_with = "deduped_set")]
    conditions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(value_type = String, example = "Pilot")]
    profession: Profession,
    #[serde(default, deserialize_with = "deduped_set")]
    goals: Vec<String>,
}

impl Default for UserProfile {
    /// The profile a fresh install starts with.
    fn default() -> Self {
        Self {
            allergies: Vec::new(),
            conditions: Vec::new(),
            profession: Profession::General,
            goals: vec![DEFAULT_GOAL.to_string()],
        }
    }
}

impl UserProfile {
    pub fn new<A, C, G>(allergies: A, conditions: C, profession: Profession, goals: G) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        Self {
            allergies: dedup_trimmed(allergies),
            conditions: dedup_trimmed(conditions),
            profession,
            goals: dedup_trimmed(goals),
        }
    }

    pub fn allergies(&self) -> &[String] {
        &self.allergies
    }

    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn profession(&self) -> &Profession {
        &self.profession
    }

    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    /// Adds the allergy if absent, removes it otherwise. Returns whether it is
    /// now part of the profile.
    pub fn toggle_allergy(&mut self, allergy: &str) -> bool {
        let allergy = allergy.trim();
        if allergy.is_empty() {
            return false;
        }

        if let Some(index) = self.allergies.iter().position(|a| a == allergy) {
            self.allergies.remove(index);
            false
        } else {
            self.allergies.push(allergy.to_string());
            true
        }
    }

    pub fn set_profession(&mut self, profession: Profession) {
        self.profession = profession;
    }

    /// Replaces the conditions with the comma separated entries of `text`.
    pub fn set_conditions_from_text(&mut self, text: &str) {
        self.conditions = dedup_trimmed(text.split(','));
    }

    pub fn set_goals<I, S>(&mut self, goals: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.goals = dedup_trimmed(goals);
    }

    pub fn apply(&mut self, edit: ProfileEdit) {
        match edit {
            ProfileEdit::ToggleAllergy(allergy) => {
                self.toggle_allergy(&allergy);
            }
            ProfileEdit::SetProfession(profession) => self.set_profession(profession),
            ProfileEdit::SetConditions(text) => self.set_conditions_from_text(&text),
            ProfileEdit::SetGoals(goals) => self.set_goals(goals),
        }
    }
}

fn dedup_trimmed<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.as_ref().trim();
        if !item.is_empty() && !out.iter().any(|existing| existing == item) {
            out.push(item.to_string());
        }
    }
    out
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn deduped_set<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer)
        .map(|items| dedup_trimmed(items.unwrap_or_default()))
}

/// Occupation used to weigh ingredient risks. The catalogue values come from
/// the profile editor; anything else is kept as a trimmed free-form label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Profession {
    #[default]
    General,
    ProfessionalAthlete,
    CombatSportsAthlete,
    Pilot,
    FirstResponder,
    MedicalProfessional,
    DriverLogistics,
    Other(CustomProfession),
}

/// A non-empty, trimmed label outside the catalogue. Only
/// [`Profession::from`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomProfession(String);

impl CustomProfession {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Profession {
    pub const CATALOGUE: [Profession; 7] = [
        Profession::General,
        Profession::ProfessionalAthlete,
        Profession::CombatSportsAthlete,
        Profession::Pilot,
        Profession::FirstResponder,
        Profession::MedicalProfessional,
        Profession::DriverLogistics,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Profession::General => "General",
            Profession::ProfessionalAthlete => "Professional Athlete",
            Profession::CombatSportsAthlete => "Combat Sports Athlete",
            Profession::Pilot => "Pilot",
            Profession::FirstResponder => "First Responder",
            Profession::MedicalProfessional => "Medical Professional",
            Profession::DriverLogistics => "Driver / Logistics",
            Profession::Other(custom) => custom.as_str(),
        }
    }
}

impl From<&str> for Profession {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return Profession::General;
        }

        Profession::CATALOGUE
            .into_iter()
            .find(|p| p.as_str() == s)
            .unwrap_or_else(|| Profession::Other(CustomProfession(s.to_string())))
    }
}

impl From<String> for Profession {
    fn from(s: String) -> Self {
        Profession::from(s.as_str())
    }
}

impl From<Profession> for String {
    fn from(p: Profession) -> Self {
        match p {
            Profession::Other(CustomProfession(value)) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
