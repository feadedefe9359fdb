//! Request handler module
//!
//! The static responder and the hyper-facing dispatch built around it.

pub mod router;
pub mod static_files;

// Re-export main entry points
pub use router::handle_request;
pub use static_files::{Hook, Responder};
