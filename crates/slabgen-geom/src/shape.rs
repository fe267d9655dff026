use crate::{Aabb, Orientation, Vec3};

/// Union of axis-aligned boxes inside the unit cube.
///
/// Boxes are kept in insertion order with exact duplicates dropped, so two
/// shapes compare equal when they hold the same set of boxes.
#[derive(Clone, Debug, Default)]
pub struct VoxelShape {
    boxes: Vec<Aabb>,
}

impl VoxelShape {
    pub const fn empty() -> Self {
        Self { boxes: Vec::new() }
    }

    pub fn cuboid(min: Vec3, max: Vec3) -> Self {
        let mut shape = Self::empty();
        shape.push_box(Aabb::new(min, max));
        shape
    }

    /// Single box in model pixel coordinates, e.g. `from_pixels(0, 0, 0, 8, 16, 16)`.
    pub fn from_pixels(x0: f32, y0: f32, z0: f32, x1: f32, y1: f32, z1: f32) -> Self {
        let mut shape = Self::empty();
        shape.push_box(Aabb::from_pixels(x0, y0, z0, x1, y1, z1));
        shape
    }

    pub fn full_cube() -> Self {
        Self::cuboid(Vec3::ZERO, Vec3::ONE)
    }

    /// Adds a box; volume-less boxes and exact duplicates are ignored.
    pub fn push_box(&mut self, b: Aabb) {
        if b.is_empty() || self.boxes.contains(&b) {
            return;
        }
        self.boxes.push(b);
    }

    pub fn union(mut self, other: &VoxelShape) -> VoxelShape {
        for b in &other.boxes {
            self.push_box(*b);
        }
        self
    }

    #[inline]
    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn for_each_box(&self, mut f: impl FnMut(Aabb)) {
        for b in &self.boxes {
            f(*b);
        }
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.boxes.iter().copied().reduce(Aabb::merge)
    }
}

impl PartialEq for VoxelShape {
    fn eq(&self, other: &Self) -> bool {
        self.boxes.len() == other.boxes.len() && self.boxes.iter().all(|b| other.boxes.contains(b))
    }
}

/// Rotates `shape` about the vertical axis from facing `from` to facing `to`.
///
/// Each quarter turn writes into a fresh accumulator; zero steps returns a
/// copy of the input.
pub fn rotate(from: Orientation, to: Orientation, shape: &VoxelShape) -> VoxelShape {
    let steps = from.steps_to(to);
    let mut current = shape.clone();
    for _ in 0..steps {
        let mut next = VoxelShape::empty();
        current.for_each_box(|b| next.push_box(b.rotated_quarter()));
        current = next;
    }
    current
}

/// One shape per cardinal orientation, derived from a single authored shape.
#[derive(Clone, Debug)]
pub struct OrientedShapes {
    canonical: Orientation,
    shapes: [VoxelShape; 4],
}

impl OrientedShapes {
    pub fn from_canonical(canonical: Orientation, shape: VoxelShape) -> Self {
        let shapes = Orientation::ALL.map(|o| rotate(canonical, o, &shape));
        Self { canonical, shapes }
    }

    #[inline]
    pub fn canonical_orientation(&self) -> Orientation {
        self.canonical
    }

    #[inline]
    pub fn canonical(&self) -> &VoxelShape {
        self.get(self.canonical)
    }

    #[inline]
    pub fn get(&self, orientation: Orientation) -> &VoxelShape {
        &self.shapes[orientation.horizontal_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn east_half() -> VoxelShape {
        VoxelShape::from_pixels(0.0, 0.0, 0.0, 8.0, 16.0, 16.0)
    }

    #[test]
    fn single_quarter_turn_moves_box() {
        let s = rotate(Orientation::East, Orientation::South, &east_half());
        assert_eq!(s, VoxelShape::from_pixels(0.0, 0.0, 0.0, 16.0, 16.0, 8.0));
    }

    #[test]
    fn half_turn_mirrors_box() {
        let s = rotate(Orientation::East, Orientation::West, &east_half());
        assert_eq!(s, VoxelShape::from_pixels(8.0, 0.0, 0.0, 16.0, 16.0, 16.0));
    }

    #[test]
    fn degenerate_boxes_are_dropped() {
        let s = VoxelShape::from_pixels(0.0, 0.0, 0.0, 0.0, 16.0, 16.0);
        assert!(s.is_empty());
        assert!(s.bounds().is_none());
    }

    #[test]
    fn equality_ignores_box_order() {
        let a = VoxelShape::from_pixels(0.0, 0.0, 0.0, 8.0, 8.0, 8.0)
            .union(&VoxelShape::from_pixels(8.0, 8.0, 8.0, 16.0, 16.0, 16.0));
        let b = VoxelShape::from_pixels(8.0, 8.0, 8.0, 16.0, 16.0, 16.0)
            .union(&VoxelShape::from_pixels(0.0, 0.0, 0.0, 8.0, 8.0, 8.0));
        assert_eq!(a, b);
        assert_eq!(a.bounds(), VoxelShape::full_cube().bounds());
    }
}
