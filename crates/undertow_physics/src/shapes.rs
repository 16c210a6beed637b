//! Trigger-region shapes
//!
//! Lightweight primitives used for overlap tests between bodies and
//! trigger volumes. These do not participate in collision response.

use undertow_math::Vec3;

/// A sphere defined by center and radius
#[derive(Clone, Copy, Debug)]
pub struct Sphere3 {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere3 {
    /// Create a new sphere at the given center with the given radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Create a unit sphere at the origin
    pub fn unit() -> Self {
        Self::new(Vec3::ZERO, 1.0)
    }

    /// Check if a point is inside or on the sphere
    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Check if another sphere overlaps this one
    pub fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        let combined = self.radius + radius;
        (center - self.center).length_squared() <= combined * combined
    }
}

/// An axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb3 {
    /// Minimum corner (all components are minimums)
    pub min: Vec3,
    /// Maximum corner (all components are maximums)
    pub max: Vec3,
}

impl Aabb3 {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents (half the size in each dimension)
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if a point is inside or on the AABB
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Get the closest point inside or on the AABB to a given point
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp_components(self.min, self.max)
    }

    /// Check if a sphere overlaps this AABB
    pub fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        (self.closest_point(center) - center).length_squared() <= radius * radius
    }

    /// Translate the AABB by a delta
    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// The shape of a trigger region
#[derive(Clone, Copy, Debug)]
pub enum Region {
    Sphere(Sphere3),
    Box(Aabb3),
}

impl Region {
    /// Create a spherical region
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::Sphere(Sphere3::new(center, radius))
    }

    /// Create a box region from center and half-extents
    pub fn boxed(center: Vec3, half_extents: Vec3) -> Self {
        Self::Box(Aabb3::from_center_half_extents(center, half_extents))
    }

    /// Check if a point is inside the region
    pub fn contains(&self, point: Vec3) -> bool {
        match self {
            Region::Sphere(s) => s.contains(point),
            Region::Box(b) => b.contains(point),
        }
    }

    /// Check if a bounding sphere overlaps the region
    pub fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        match self {
            Region::Sphere(s) => s.overlaps_sphere(center, radius),
            Region::Box(b) => b.overlaps_sphere(center, radius),
        }
    }

    /// Get the center of the region
    pub fn center(&self) -> Vec3 {
        match self {
            Region::Sphere(s) => s.center,
            Region::Box(b) => b.center(),
        }
    }

    /// Get an AABB enclosing the region
    pub fn bounds(&self) -> Aabb3 {
        match self {
            Region::Sphere(s) => Aabb3::from_center_half_extents(
                s.center,
                Vec3::new(s.radius, s.radius, s.radius),
            ),
            Region::Box(b) => *b,
        }
    }
}
