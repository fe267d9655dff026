//! Minimal geometry for block shapes: vectors, unit-cube boxes, box unions
//! and quarter turns about the vertical axis.
#![forbid(unsafe_code)]

use core::ops::{Add, Div, Mul, Sub};

mod orientation;
mod shape;

pub use orientation::Orientation;
pub use shape::{OrientedShapes, VoxelShape, rotate};

/// Number of model pixels along one edge of the unit cube.
pub const PIXELS_PER_BLOCK: f32 = 16.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn min_by_axis(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x.min(rhs.x), self.y.min(rhs.y), self.z.min(rhs.z))
    }

    #[inline]
    pub fn max_by_axis(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Axis-aligned box inside the unit cube `[0,1]³`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Builds a box from model pixel coordinates (0..=16 per axis).
    #[inline]
    pub fn from_pixels(x0: f32, y0: f32, z0: f32, x1: f32, y1: f32, z1: f32) -> Self {
        Self::new(
            Vec3::new(x0, y0, z0) / PIXELS_PER_BLOCK,
            Vec3::new(x1, y1, z1) / PIXELS_PER_BLOCK,
        )
    }

    #[inline]
    pub fn to_pixels(self) -> (Vec3, Vec3) {
        (self.min * PIXELS_PER_BLOCK, self.max * PIXELS_PER_BLOCK)
    }

    #[inline]
    pub fn extents(self) -> Vec3 {
        self.max - self.min
    }

    /// True when the box encloses no volume.
    #[inline]
    pub fn is_empty(self) -> bool {
        let e = self.extents();
        e.x <= 0.0 || e.y <= 0.0 || e.z <= 0.0
    }

    /// Smallest box enclosing both.
    #[inline]
    pub fn merge(self, other: Aabb) -> Aabb {
        Aabb::new(self.min.min_by_axis(other.min), self.max.max_by_axis(other.max))
    }

    /// One clockwise quarter turn (seen from above) about the vertical axis
    /// through the cube center.
    #[inline]
    pub fn rotated_quarter(self) -> Aabb {
        Aabb::new(
            Vec3::new(1.0 - self.max.z, self.min.y, self.min.x),
            Vec3::new(1.0 - self.min.z, self.max.y, self.max.x),
        )
    }
}
