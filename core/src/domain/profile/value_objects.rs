use crate::domain::profile::entities::{Profession, UserProfile};

/// Key the profile blob is stored under.
pub const PROFILE_STORAGE_KEY: &str = "labeliq_profile";

pub const DEFAULT_GOAL: &str = "Health optimization";

pub const COMMON_ALLERGIES: [&str; 8] = [
    "Peanuts",
    "Tree Nuts",
    "Milk",
    "Eggs",
    "Soy",
    "Wheat",
    "Shellfish",
    "Fish",
];

/// A single change made in the profile editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEdit {
    ToggleAllergy(String),
    SetProfession(Profession),
    SetConditions(String),
    SetGoals(Vec<String>),
}

/// The committed profile together with a version bumped on every save.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionedProfile {
    version: u64,
    profile: UserProfile,
}

impl VersionedProfile {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            version: 0,
            profile,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn commit(&mut self, profile: UserProfile) -> u64 {
        self.profile = profile;
        self.version += 1;
        self.version
    }
}
