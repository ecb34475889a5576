//! Role hierarchy and access scoping.
//!
//! Determines, for a given acting user, which expense records they may
//! see and act on: their own, their direct reports', or everything.

mod error;
mod role;
mod scope;
mod user;

pub use error::AccessError;
pub use role::Role;
pub use scope::VisibilityScope;
pub use user::User;
