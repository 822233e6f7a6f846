//! Capability and ownership checks.
//!
//! Two independent gates guard every mutating operation: the capability check
//! (class-level, knows nothing about resource instances) and the ownership
//! check (instance-level, knows nothing about capability bits). Both are pure
//! functions of their inputs. Deny wins.

use crate::capability::Capability;
use crate::context::SecurityContext;

/// A denied access decision, terminal for the request pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    /// The subject's capability set does not intersect the required mask.
    #[error("operation requires {required} capability")]
    MissingCapability { required: Capability },

    /// The subject is not the owner of the resource instance.
    #[error("subject is not the resource owner")]
    NotOwner,
}

/// Allows iff the subject holds at least one of the required capability bits.
///
/// `required` may be a single capability or several OR'd together; any
/// intersection with the subject's grant allows the operation.
pub fn require_capability(
    ctx: &SecurityContext,
    required: Capability,
) -> Result<(), AccessDenied> {
    if ctx.permissions().intersects(required) {
        Ok(())
    } else {
        Err(AccessDenied::MissingCapability { required })
    }
}

/// Allows iff the subject identity equals the resource's stored owner.
///
/// Evaluated per-instance, after the capability check, and independent of it:
/// a full capability set never overrides ownership.
pub fn require_owner(ctx: &SecurityContext, owner: &str) -> Result<(), AccessDenied> {
    if ctx.subject_id() == owner {
        Ok(())
    } else {
        Err(AccessDenied::NotOwner)
    }
}
