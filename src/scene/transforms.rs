//! Matrix builders for composing node transforms.
//!
//! Angles are in degrees throughout the crate. Matrices compose
//! left-to-right in application order from the point's perspective:
//! `translate(..) * rotate_y(..)` rotates first, then translates.

use cgmath::{Deg, Matrix4, Vector3};

pub fn translate(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

pub fn translate_vec(v: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(v)
}

pub fn scale(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_nonuniform_scale(x, y, z)
}

pub fn rotate_x(degrees: f32) -> Matrix4<f32> {
    Matrix4::from_angle_x(Deg(degrees))
}

pub fn rotate_y(degrees: f32) -> Matrix4<f32> {
    Matrix4::from_angle_y(Deg(degrees))
}

pub fn rotate_z(degrees: f32) -> Matrix4<f32> {
    Matrix4::from_angle_z(Deg(degrees))
}

/// Unit cube scaled to a box of the given extents, sitting on y = 0.
pub fn box_on_floor(width: f32, height: f32, depth: f32) -> Matrix4<f32> {
    scale(width, height, depth) * translate(0.0, 0.5, 0.0)
}

#[cfg(test)]
pub(crate) fn mat4_approx_eq(a: &Matrix4<f32>, b: &Matrix4<f32>, eps: f32) -> bool {
    let a: &[f32; 16] = a.as_ref();
    let b: &[f32; 16] = b.as_ref();
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= eps)
}
