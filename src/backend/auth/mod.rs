//! Authentication
//!
//! User accounts, bcrypt password hashing, and JWT session tokens.

/// Signup, login, and me handlers
pub mod handlers;

/// JWT token creation and verification
pub mod sessions;

/// User model and database operations
pub mod users;
