//! Types kept in the visitor's session.

pub mod session;

pub use session::{Flash, keys as session_keys};
