mod credential;
mod dashboard;
mod envelope;
mod group_asset;
mod notification;
mod result;
mod user_default;

pub use credential::*;
pub use dashboard::*;
pub use envelope::*;
pub use group_asset::*;
pub use notification::*;
pub use result::*;
pub use user_default::*;
pub use well_test::*;
