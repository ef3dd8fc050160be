pub mod patient;
pub mod settings;

pub use patient::*;
pub use settings::*;
