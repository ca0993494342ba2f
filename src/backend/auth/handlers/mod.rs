//! Authentication Handlers
//!
//! HTTP handlers for signup, login, and fetching the current user.

/// Login handler
pub mod login;

/// Current-user handler
pub mod me;

/// Signup handler
pub mod signup;

/// Request and response types
pub mod types;

pub use login::login;
pub use me::get_me;
pub use signup::signup;
