//! Physical shape of an entity and the collision body derived from it.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Position and footprint of an entity inside its zone.
///
/// Simple data struct: any combination of values is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Shape {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub radius: i32,
}

impl Shape {
    pub fn at(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z, radius: 0 }
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }
}

/// Axis-aligned collision bounds, computed from a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
    pub layer: i32,
}

impl Body {
    pub fn from_shape(shape: &Shape) -> Self {
        let r = shape.radius.max(0);
        Self {
            min_x: shape.x.saturating_sub(r),
            min_y: shape.y.saturating_sub(r),
            max_x: shape.x.saturating_add(r),
            max_y: shape.y.saturating_add(r),
            layer: shape.z,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Collision body that is never persisted and is rebuilt on first access.
///
/// Two lazy bodies always compare equal: the body is derived state, so it
/// never distinguishes two otherwise identical entities.
#[derive(Default)]
pub struct LazyBody(OnceLock<Body>);

impl LazyBody {
    pub fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the body, building it from `shape` if this is the first call.
    pub fn get_or_build(&self, shape: &Shape) -> &Body {
        self.0.get_or_init(|| Body::from_shape(shape))
    }

    pub fn is_built(&self) -> bool {
        self.0.get().is_some()
    }

    /// Drop the cached body, e.g. after the shape moved.
    pub fn invalidate(&mut self) {
        self.0 = OnceLock::new();
    }
}

impl Clone for LazyBody {
    fn clone(&self) -> Self {
        // A clone may be moved independently, so it rebuilds its own body.
        Self::new()
    }
}

impl PartialEq for LazyBody {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Debug for LazyBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get() {
            Some(body) => f.debug_tuple("LazyBody").field(body).finish(),
            None => f.write_str("LazyBody(<unbuilt>)"),
        }
    }
}
