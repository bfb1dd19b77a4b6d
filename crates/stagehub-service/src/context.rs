//! Request context carrying the acting principal.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current request.
///
/// Extracted by the caller (HTTP handler, CLI) and passed into service
/// methods so that every operation knows *who* is acting. The principal is
/// loaded and authorized inside the service; the context only carries its
/// id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting principal's id.
    pub principal_id: Uuid,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(principal_id: Uuid) -> Self {
        Self { principal_id }
    }
}
