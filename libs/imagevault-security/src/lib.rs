pub mod access;
pub mod capability;
pub mod context;

pub use access::{AccessDenied, require_capability, require_owner};
pub use capability::Capability;
pub use context::SecurityContext;
