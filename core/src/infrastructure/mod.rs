pub mod capture;
pub mod llm;
pub mod profile;
pub mod proxy;
