//! In-memory resource lookup.

use std::sync::Arc;

use dashmap::DashMap;
use delve_domain::{Resource, ResourceKind};

use crate::infrastructure::ports::ResourceLookup;

/// Resource definitions held in memory, keyed by id.
///
/// Stands in for the declarative resource loader, which lives outside the
/// engine.
#[derive(Debug, Default)]
pub struct InMemoryResources {
    by_id: DashMap<String, Arc<Resource>>,
}

impl InMemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        let lookup = Self::new();
        for resource in resources {
            lookup.insert(resource);
        }
        lookup
    }

    /// Register a resource, replacing any earlier one with the same id.
    pub fn insert(&self, resource: Resource) -> Option<Arc<Resource>> {
        self.by_id.insert(resource.id.clone(), Arc::new(resource))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl ResourceLookup for InMemoryResources {
    fn get_resource(&self, id: &str) -> Option<Arc<Resource>> {
        self.by_id.get(id).map(|entry| Arc::clone(entry.value()))
    }

    fn get_resource_of(&self, id: &str, kind: ResourceKind) -> Option<Arc<Resource>> {
        self.get_resource(id).filter(|resource| resource.kind == kind)
    }

    fn get_resources(&self, kind: ResourceKind) -> Vec<Arc<Resource>> {
        let mut resources: Vec<_> = self
            .by_id
            .iter()
            .filter(|entry| entry.value().kind == kind)
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        resources.sort_by(|a, b| a.id.cmp(&b.id));
        resources
    }
}
