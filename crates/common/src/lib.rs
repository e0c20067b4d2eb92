pub mod auth;
pub mod domain;
pub mod validation;
pub mod memory;
pub mod telemetry;
