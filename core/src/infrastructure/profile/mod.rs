pub mod file_profile_store;

pub use file_profile_store::FileProfileStore;
