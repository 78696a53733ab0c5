//! Ports for collaborators that live outside the engine.

use std::sync::Arc;

use delve_domain::{Resource, ResourceKind};

use super::ActionError;

/// Read access to resource definitions loaded by someone else.
///
/// Codecs use this to turn persisted resource ids back into shared
/// resources. A missing id is `None`, never an error.
#[cfg_attr(test, mockall::automock)]
pub trait ResourceLookup: Send + Sync {
    fn get_resource(&self, id: &str) -> Option<Arc<Resource>>;

    /// Like [`get_resource`](Self::get_resource), but only matches a
    /// resource of the given kind.
    fn get_resource_of(&self, id: &str, kind: ResourceKind) -> Option<Arc<Resource>>;

    fn get_resources(&self, kind: ResourceKind) -> Vec<Arc<Resource>>;
}

/// Runs scripts named by scheduled entries.
#[cfg_attr(test, mockall::automock)]
pub trait ScriptExecutor: Send + Sync {
    fn execute(&self, script_id: &str) -> Result<(), ActionError>;
}
