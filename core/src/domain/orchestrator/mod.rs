pub mod controller;
pub mod entities;
pub mod services;

pub use controller::AppController;
pub use entities::*;
pub use services::Orchestrator;
