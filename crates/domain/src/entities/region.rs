//! Region - a rectangular patch of terrain inside a zone.
//!
//! Regions are positioned in the coordinate space of their zone. Terrain and
//! theme are external resources: the region keeps the resolved definitions,
//! the persisted form keeps only their identifiers.

use std::sync::Arc;

use crate::value_objects::{Resource, ResourceKind};
use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    /// Layer within the zone; higher layers draw over lower ones
    pub z: i32,
    pub width: i32,
    pub height: i32,
    terrain: Arc<Resource>,
    theme: Option<Arc<Resource>>,
    pub label: Option<String>,
    /// Script identifiers run when something enters the region
    pub scripts: Vec<String>,
}

impl Region {
    pub fn new(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        terrain: Arc<Resource>,
    ) -> Result<Self, DomainError> {
        if width <= 0 || height <= 0 {
            return Err(DomainError::validation(format!(
                "region size must be positive, got {width}x{height}"
            )));
        }
        if terrain.kind != ResourceKind::Terrain {
            return Err(DomainError::validation(format!(
                "region terrain {} is a {} resource",
                terrain.id, terrain.kind
            )));
        }
        Ok(Self {
            x,
            y,
            z: 0,
            width,
            height,
            terrain,
            theme: None,
            label: None,
            scripts: Vec::new(),
        })
    }

    pub fn with_theme(mut self, theme: Option<Arc<Resource>>) -> Self {
        self.theme = theme;
        self
    }

    pub fn terrain(&self) -> &Arc<Resource> {
        &self.terrain
    }

    pub fn theme(&self) -> Option<&Arc<Resource>> {
        self.theme.as_ref()
    }

    /// Half-open on the far edges, which may lie past `i32::MAX`.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let within = |point: i32, start: i32, size: i32| {
            let offset = i64::from(point) - i64::from(start);
            offset >= 0 && offset < i64::from(size)
        };
        within(x, self.x, self.width) && within(y, self.y, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grass() -> Arc<Resource> {
        Arc::new(Resource::new("terrain.grass", ResourceKind::Terrain, "Grass"))
    }

    #[test]
    fn contains_is_half_open() {
        let region = Region::new(0, 0, 4, 2, grass()).unwrap();
        assert!(region.contains(3, 1));
        assert!(!region.contains(4, 1));
        assert!(!region.contains(0, 2));
    }

    #[test]
    fn contains_handles_regions_at_the_coordinate_limits() {
        let far = Region::new(i32::MAX - 1, 0, 5, 5, grass()).unwrap();
        assert!(far.contains(i32::MAX, 1));
        assert!(!far.contains(i32::MAX - 2, 1));

        let near = Region::new(i32::MIN, i32::MIN, 3, 3, grass()).unwrap();
        assert!(near.contains(i32::MIN, i32::MIN + 2));
        assert!(!near.contains(i32::MIN + 3, i32::MIN));
        assert!(!near.contains(i32::MAX, i32::MIN));
    }

    #[test]
    fn empty_region_is_rejected() {
        assert!(Region::new(0, 0, 0, 3, grass()).is_err());
    }

    #[test]
    fn terrain_must_be_terrain() {
        let theme = Arc::new(Resource::new("theme.crypt", ResourceKind::Theme, "Crypt"));
        assert!(Region::new(0, 0, 1, 1, theme).is_err());
    }
}
