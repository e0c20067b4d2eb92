mod config;
mod jwt;
mod password;
mod time;
mod traits;

pub use config::*;
pub use jwt::*;
pub use password::*;
pub use time::*;
pub use traits::*;
