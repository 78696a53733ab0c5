//! Externally defined resources referenced by identifier.
//!
//! Resources are loaded and owned elsewhere; persisted records only carry a
//! resource's `id` and resolve it again when they are decoded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Terrain,
    Theme,
    Item,
    Creature,
    Map,
    Script,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Terrain => "terrain",
            ResourceKind::Theme => "theme",
            ResourceKind::Item => "item",
            ResourceKind::Creature => "creature",
            ResourceKind::Map => "map",
            ResourceKind::Script => "script",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terrain" => Ok(ResourceKind::Terrain),
            "theme" => Ok(ResourceKind::Theme),
            "item" => Ok(ResourceKind::Item),
            "creature" => Ok(ResourceKind::Creature),
            "map" => Ok(ResourceKind::Map),
            "script" => Ok(ResourceKind::Script),
            other => Err(DomainError::validation(format!(
                "unknown resource kind: {other}"
            ))),
        }
    }
}

/// A resource definition as seen by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub kind: ResourceKind,
    pub name: String,
}

impl Resource {
    pub fn new(id: impl Into<String>, kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
        }
    }
}
