//! Signed solid angle of a triangle seen from the observation point.

use nalgebra::Vector3;

use crate::error::{FieldError, FieldResult};

/// Solid angle subtended by triangle `(a, b, c)` at the origin.
///
/// The vertices are position vectors from the observation point, ordered
/// counter-clockwise when viewed from outside the body. Uses the
/// Van Oosterom–Strackee identity:
///
/// ```text
/// tan(Ω/2) = a · (b × c) / (|a||b||c| + (a·b)|c| + (a·c)|b| + (b·c)|a|)
/// ```
///
/// The result lies in (−2π, 2π); the sign encodes which side of the
/// triangle the observation point is on.
///
/// # Errors
///
/// [`FieldError::SingularFacePlane`] when the denominator vanishes, which
/// happens when the observation point lies in the triangle's plane in a
/// configuration the closed form does not cover. The singularity is
/// surfaced rather than letting the arctangent run on NaN or infinity.
///
/// # Example
///
/// ```
/// use gravmag_field::solid_angle;
/// use gravmag_types::Vector3;
///
/// // One octant of the sphere: 4π/8.
/// let omega = solid_angle(
///     Vector3::new(1.0, 0.0, 0.0),
///     Vector3::new(0.0, 1.0, 0.0),
///     Vector3::new(0.0, 0.0, 1.0),
/// )
/// .unwrap();
/// assert!((omega - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn solid_angle(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> FieldResult<f64> {
    let det = a.dot(&b.cross(&c));
    let (an, bn, cn) = (a.norm(), b.norm(), c.norm());
    let denom = an * bn * cn + a.dot(&b) * cn + a.dot(&c) * bn + b.dot(&c) * an;

    let tan_half = det / denom;
    if !tan_half.is_finite() {
        return Err(FieldError::SingularFacePlane);
    }
    Ok(2.0 * tan_half.atan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn octant_is_eighth_of_sphere() {
        let omega = solid_angle(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(omega, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn known_asymmetric_value() {
        let omega = solid_angle(
            Vector3::new(1.0, 0.5, 0.25),
            Vector3::new(-0.3, 1.2, 0.5),
            Vector3::new(0.2, -0.4, 1.0),
        )
        .unwrap();
        assert_relative_eq!(omega, 1.148_127_894_854_941, epsilon = 1e-12);
    }

    #[test]
    fn reversed_winding_negates() {
        let (a, b, c) = (
            Vector3::new(1.0, 0.2, 0.1),
            Vector3::new(-0.4, 1.1, 0.3),
            Vector3::new(0.3, -0.2, 1.5),
        );
        let forward = solid_angle(a, b, c).unwrap();
        let reversed = solid_angle(a, c, b).unwrap();
        assert_relative_eq!(forward, -reversed, epsilon = 1e-14);
    }

    #[test]
    fn scale_invariant() {
        let (a, b, c) = (
            Vector3::new(1.0, 0.2, 0.1),
            Vector3::new(-0.4, 1.1, 0.3),
            Vector3::new(0.3, -0.2, 1.5),
        );
        let near = solid_angle(a, b, c).unwrap();
        let far = solid_angle(a * 250.0, b * 250.0, c * 250.0).unwrap();
        assert_relative_eq!(near, far, epsilon = 1e-12);
    }

    #[test]
    fn vanishing_denominator_is_an_error() {
        // Antipodal pair makes every denominator term cancel.
        let result = solid_angle(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
        );
        assert_eq!(result, Err(FieldError::SingularFacePlane));
    }

    #[test]
    fn coplanar_but_regular_is_zero() {
        // Observation point in the triangle's plane but outside the
        // singular configuration: the solid angle is zero, not an error.
        let omega = solid_angle(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 1.0, 0.0),
            Vector3::new(2.0, -1.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(omega, 0.0, epsilon = 1e-14);
    }
}
