pub mod domain;
pub mod services;

pub use domain::*;
pub use services::*;
