pub mod auth;
pub mod logging;

pub mod request_id;

pub use auth::*;
pub use logging::*;
pub use request_id::*;
