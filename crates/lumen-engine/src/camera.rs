//! Camera and transform math.
//!
//! cgmath builds OpenGL-style clip space (depth in `[-1, 1]`); wgpu expects
//! depth in `[0, 1]`, so every projection here is premultiplied by
//! `OPENGL_TO_WGPU_MATRIX`.

use bytemuck::{Pod, Zeroable};
use cgmath::{Deg, InnerSpace, Matrix4, Point3, Rad, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Right-handed perspective projection, vertical field of view in degrees.
pub fn perspective(fovy_deg: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    OPENGL_TO_WGPU_MATRIX * cgmath::perspective(Deg(fovy_deg), aspect, near, far)
}

pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Matrix4<f32> {
    OPENGL_TO_WGPU_MATRIX * cgmath::ortho(left, right, bottom, top, near, far)
}

pub fn look_at(eye: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::look_at_rh(eye, target, up)
}

/// Rotation of `angle_rad` around `axis` (normalized here).
pub fn rotation(axis: Vector3<f32>, angle_rad: f32) -> Matrix4<f32> {
    Matrix4::from_axis_angle(axis.normalize(), Rad(angle_rad))
}

pub fn translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

/// Model / view / projection matrices as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct MvpUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl MvpUniform {
    pub fn new(model: Matrix4<f32>, view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self {
            model: model.into(),
            view: view.into(),
            projection: projection.into(),
        }
    }
}

impl Default for MvpUniform {
    fn default() -> Self {
        use cgmath::SquareMatrix;
        let id = Matrix4::identity();
        Self::new(id, id, id)
    }
}

/// Accumulating rotation angle, advanced by a fixed step per frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Spin {
    pub angle: f32,
}

impl Spin {
    /// Advances by `step` radians and returns the new angle.
    pub fn advance(&mut self, step: f32) -> f32 {
        self.angle += step;
        self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector4, Transform};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn ndc_depth(m: Matrix4<f32>, p: Vector4<f32>) -> f32 {
        let c = m * p;
        c.z / c.w
    }

    // ── projections ───────────────────────────────────────────────────────

    #[test]
    fn perspective_maps_near_to_zero_far_to_one() {
        let p = perspective(45.0, 800.0 / 600.0, 0.1, 100.0);
        assert!(approx(ndc_depth(p, Vector4::new(0.0, 0.0, -0.1, 1.0)), 0.0));
        assert!(approx(ndc_depth(p, Vector4::new(0.0, 0.0, -100.0, 1.0)), 1.0));
    }

    #[test]
    fn orthographic_maps_depth_range_to_unit() {
        let o = orthographic(-10.0, 10.0, -10.0, 10.0, 1.0, 25.0);
        assert!(approx(ndc_depth(o, Vector4::new(0.0, 0.0, -1.0, 1.0)), 0.0));
        assert!(approx(ndc_depth(o, Vector4::new(0.0, 0.0, -25.0, 1.0)), 1.0));
        let edge = o * Vector4::new(10.0, -10.0, -5.0, 1.0);
        assert!(approx(edge.x, 1.0) && approx(edge.y, -1.0));
    }

    // ── view / model ──────────────────────────────────────────────────────

    #[test]
    fn look_at_moves_eye_to_origin() {
        let eye = Point3::new(0.0, 0.0, 3.0);
        let v = look_at(eye, Point3::new(0.0, 0.0, 0.0), Vector3::unit_y());
        let p = v.transform_point(eye);
        assert!(approx(p.x, 0.0) && approx(p.y, 0.0) && approx(p.z, 0.0));
    }

    #[test]
    fn look_at_target_is_in_front() {
        let v = look_at(Point3::new(0.0, 5.0, 10.0), Point3::new(0.0, 0.0, 0.0), Vector3::unit_y());
        let p = v.transform_point(Point3::new(0.0, 0.0, 0.0));
        assert!(p.z < 0.0);
        assert!(approx(p.x, 0.0));
    }

    #[test]
    fn rotation_about_z_quarter_turn() {
        let r = rotation(Vector3::unit_z(), std::f32::consts::FRAC_PI_2);
        let v = r.transform_vector(Vector3::unit_x());
        assert!(approx(v.x, 0.0) && approx(v.y, 1.0));
    }

    #[test]
    fn rotation_normalizes_axis() {
        let a = rotation(Vector3::new(1.0, 1.0, 0.0), 0.3);
        let b = rotation(Vector3::new(2.0, 2.0, 0.0), 0.3);
        let (a, b): ([[f32; 4]; 4], [[f32; 4]; 4]) = (a.into(), b.into());
        for (ca, cb) in a.iter().zip(b.iter()) {
            for (x, y) in ca.iter().zip(cb.iter()) {
                assert!(approx(*x, *y));
            }
        }
    }

    #[test]
    fn translation_moves_points() {
        let p = translation(0.0, 0.0, -3.0).transform_point(Point3::new(1.0, 2.0, 0.0));
        assert_eq!(p, Point3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn spin_accumulates() {
        let mut s = Spin::default();
        s.advance(0.01);
        assert!(approx(s.advance(0.01), 0.02));
    }

    #[test]
    fn mvp_uniform_is_three_mat4() {
        assert_eq!(std::mem::size_of::<MvpUniform>(), 3 * 64);
    }
}
