pub mod entities;
pub mod ports;
pub mod value_objects;

pub use entities::*;
pub use ports::ProfileStore;
pub use value_objects::*;
