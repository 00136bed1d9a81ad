//! `elegante-auth` — roles, permissions and the demo user directory.
//!
//! This crate only answers "may this user see/do X"; the inventory store
//! itself performs no authorization. Credential matching here is a demo
//! convenience, not a security boundary.

pub mod authorize;
pub mod permissions;
pub mod roles;
pub mod user;

pub use authorize::{authorize, navigation, AuthzError, Section};
pub use permissions::Permission;
pub use roles::Role;
pub use user::{User, UserDirectory};
