use glam::Vec3;

/// Half-width of the box used when framing without known scene bounds.
const UNBOUNDED_HALF_EXTENT: f32 = 10_000.0;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Default for Aabb {
    /// A very large box centered on the origin, used when the scene extent
    /// is not known.
    fn default() -> Self {
        Self {
            min: Vec3::splat(-UNBOUNDED_HALF_EXTENT),
            max: Vec3::splat(UNBOUNDED_HALF_EXTENT),
        }
    }
}

impl Aabb {
    /// Box spanning `min..max`.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |bounds, p| Self {
            min: bounds.min.min(p),
            max: bounds.max.max(p),
        }))
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    /// Edge lengths along each axis.
    #[must_use]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}
