//! Logarithmic line integral over a triangle's edges.

use nalgebra::Vector3;

use crate::error::{FieldError, FieldResult};

/// Line-integral vector accumulated over the three directed edges of a
/// triangle.
///
/// `v` holds the triangle's vertices as position vectors from the
/// observation point. For each edge `v[t] → v[(t+1) % 3]` the standard
/// logarithmic potential integral `∫ dl / r` is evaluated in closed form
/// and accumulated along the edge direction; the sum over the three edges
/// is returned.
///
/// Reversing the winding reverses every edge direction and therefore
/// negates the result.
///
/// # Errors
///
/// - [`FieldError::ObservationOnVertex`] when a vertex coincides with the
///   observation point (the integral diverges there)
/// - [`FieldError::DegenerateEdge`] when two vertices coincide
pub fn edge_integral(v: &[Vector3<f64>; 3]) -> FieldResult<Vector3<f64>> {
    let mut acc = Vector3::zeros();

    for t in 0..3 {
        let p1 = v[t];
        let p2 = v[(t + 1) % 3];
        let edge = p2 - p1;
        let len = edge.norm();
        if len == 0.0 {
            return Err(FieldError::DegenerateEdge);
        }
        let r1 = p1.norm();
        if r1 == 0.0 {
            return Err(FieldError::ObservationOnVertex);
        }

        let b = 2.0 * p1.dot(&edge);
        let half_b = b / (2.0 * len);
        let denom = r1 + half_b;

        // When the edge line passes through the observation point the
        // regular form divides by zero; the limit has its own closed form.
        let integral = if denom.abs() < f64::EPSILON {
            ((len - r1).abs() / r1).ln() / len
        } else {
            let r2 = (len.mul_add(len, b) + r1 * r1).sqrt();
            ((r2 + len + half_b) / denom).ln() / len
        };

        acc += integral * edge;
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn known_asymmetric_value() {
        let pqr = edge_integral(&[
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
            Vector3::new(0.0, 0.0, 3.0),
        ])
        .unwrap();

        assert_relative_eq!(pqr.x, -1.822_257_910_124_168e-1, epsilon = 1e-12);
        assert_relative_eq!(pqr.y, 7.121_322_535_761_203e-1, epsilon = 1e-12);
        assert_relative_eq!(pqr.z, -5.215_210_073_269_303e-1, epsilon = 1e-12);
    }

    #[test]
    fn symmetric_triangle_cancels() {
        // The equilateral triangle on the axis unit points is symmetric
        // around the origin's projection; the edge contributions cancel.
        let pqr = edge_integral(&[
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        ])
        .unwrap();
        assert_relative_eq!(pqr.norm(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn reversed_winding_negates() {
        let forward = edge_integral(&[
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
            Vector3::new(0.0, 0.0, 3.0),
        ])
        .unwrap();
        let reversed = edge_integral(&[
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 3.0),
            Vector3::new(0.0, 2.0, 0.0),
        ])
        .unwrap();

        assert_relative_eq!(forward.x, -reversed.x, epsilon = 1e-12);
        assert_relative_eq!(forward.y, -reversed.y, epsilon = 1e-12);
        assert_relative_eq!(forward.z, -reversed.z, epsilon = 1e-12);
    }

    #[test]
    fn vertex_on_observation_point_is_an_error() {
        let result = edge_integral(&[
            Vector3::zeros(),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ]);
        assert_eq!(result, Err(FieldError::ObservationOnVertex));
    }

    #[test]
    fn zero_length_edge_is_an_error() {
        let p = Vector3::new(1.0, 1.0, 1.0);
        let result = edge_integral(&[p, p, Vector3::new(0.0, 1.0, 0.0)]);
        assert_eq!(result, Err(FieldError::DegenerateEdge));
    }
}
