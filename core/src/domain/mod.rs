pub mod analysis;
pub mod capture;
pub mod common;
pub mod orchestrator;
pub mod profile;
pub mod rate_limit;
