use slabgen_geom::{Aabb, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::ONE, Vec3::new(1.0, 1.0, 1.0), 1e-6));
}

#[test]
fn vec3_scalar_mul_div() {
    let v = Vec3::new(1.5, -2.0, 4.0);
    let m = v * 2.0;
    assert!(vec3_approx_eq(m, Vec3::new(3.0, -4.0, 8.0), 1e-6));

    let d = m / 2.0;
    assert!(vec3_approx_eq(d, v, 1e-6));
}

#[test]
fn vec3_axis_min_max() {
    let a = Vec3::new(0.0, 5.0, -1.0);
    let b = Vec3::new(2.0, 1.0, 3.0);
    assert_eq!(a.min_by_axis(b), Vec3::new(0.0, 1.0, -1.0));
    assert_eq!(a.max_by_axis(b), Vec3::new(2.0, 5.0, 3.0));
}

#[test]
fn aabb_from_pixels_normalizes() {
    let b = Aabb::from_pixels(0.0, 0.0, 0.0, 8.0, 16.0, 16.0);
    assert!(vec3_approx_eq(b.min, Vec3::ZERO, 1e-6));
    assert!(vec3_approx_eq(b.max, Vec3::new(0.5, 1.0, 1.0), 1e-6));
    let (pmin, pmax) = b.to_pixels();
    assert!(vec3_approx_eq(pmin, Vec3::ZERO, 1e-6));
    assert!(vec3_approx_eq(pmax, Vec3::new(8.0, 16.0, 16.0), 1e-6));
}

#[test]
fn aabb_quarter_turn_keeps_height() {
    let b = Aabb::from_pixels(2.0, 3.0, 4.0, 6.0, 9.0, 12.0);
    let r = b.rotated_quarter();
    assert_eq!(r.min.y, b.min.y);
    assert_eq!(r.max.y, b.max.y);
    // x/z extents swap under a quarter turn
    assert!(approx_eq(r.extents().x, b.extents().z, 1e-6));
    assert!(approx_eq(r.extents().z, b.extents().x, 1e-6));
}

#[test]
fn aabb_empty_and_merge() {
    assert!(Aabb::from_pixels(4.0, 0.0, 0.0, 4.0, 16.0, 16.0).is_empty());
    let a = Aabb::from_pixels(0.0, 0.0, 0.0, 8.0, 8.0, 8.0);
    let b = Aabb::from_pixels(8.0, 8.0, 8.0, 16.0, 16.0, 16.0);
    assert_eq!(a.merge(b), Aabb::new(Vec3::ZERO, Vec3::ONE));
}
