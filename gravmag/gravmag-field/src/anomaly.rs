//! Per-face assembly of the gravity and magnetic anomaly.

use gravmag_types::OrientedMesh;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use tracing::debug;

use crate::constants::{GRAVITATIONAL_CONSTANT, MAGNETIC_SCALE};
use crate::edge_integral::edge_integral;
use crate::error::{FieldError, FieldResult};
use crate::solid_angle::solid_angle;

/// Homogeneous material properties of the body.
///
/// # Example
///
/// ```
/// use gravmag_field::BodyProperties;
/// use gravmag_types::Vector3;
///
/// let basalt = BodyProperties::new(Vector3::new(2.0, 0.0, 1.5), 2900.0);
/// let sediment = BodyProperties::uniform_density(2100.0);
/// assert_eq!(sediment.magnetization, Vector3::zeros());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyProperties {
    /// Magnetization vector, A/m, constant over the body.
    pub magnetization: Vector3<f64>,

    /// Mass density, kg/m³, constant over the body.
    pub density: f64,
}

impl BodyProperties {
    /// Create properties from a magnetization vector and a density.
    #[inline]
    #[must_use]
    pub const fn new(magnetization: Vector3<f64>, density: f64) -> Self {
        Self {
            magnetization,
            density,
        }
    }

    /// A non-magnetic body of the given density.
    #[inline]
    #[must_use]
    pub fn uniform_density(density: f64) -> Self {
        Self::new(Vector3::zeros(), density)
    }

    /// A massless magnetized body (magnetic anomaly only).
    #[inline]
    #[must_use]
    pub fn magnetized(magnetization: Vector3<f64>) -> Self {
        Self::new(magnetization, 0.0)
    }

    fn is_finite(&self) -> bool {
        self.density.is_finite() && self.magnetization.iter().all(|m| m.is_finite())
    }
}

/// Anomaly at the observation point: magnetic flux density in tesla and
/// gravitational acceleration in m/s².
///
/// The gravity vector points from the observation point toward the body.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Anomaly {
    /// Magnetic flux density, x component (T).
    pub bx: f64,
    /// Magnetic flux density, y component (T).
    pub by: f64,
    /// Magnetic flux density, z component (T).
    pub bz: f64,
    /// Gravitational acceleration, x component (m/s²).
    pub gx: f64,
    /// Gravitational acceleration, y component (m/s²).
    pub gy: f64,
    /// Gravitational acceleration, z component (m/s²).
    pub gz: f64,
}

impl Anomaly {
    /// The magnetic flux density as a vector.
    #[inline]
    #[must_use]
    pub fn magnetic(&self) -> Vector3<f64> {
        Vector3::new(self.bx, self.by, self.bz)
    }

    /// The gravitational acceleration as a vector.
    #[inline]
    #[must_use]
    pub fn gravity(&self) -> Vector3<f64> {
        Vector3::new(self.gx, self.gy, self.gz)
    }

    fn from_sums(b: Vector3<f64>, g: Vector3<f64>) -> Self {
        Self {
            bx: b.x,
            by: b.y,
            bz: b.z,
            gx: g.x,
            gy: g.y,
            gz: g.z,
        }
    }
}

/// Anomaly of `mesh` observed from the coordinate origin.
///
/// Equivalent to [`compute_anomaly_at`] with the origin as observation
/// point.
///
/// # Errors
///
/// See [`compute_anomaly_at`].
pub fn compute_anomaly(mesh: &OrientedMesh, body: &BodyProperties) -> FieldResult<Anomaly> {
    compute_anomaly_at(mesh, body, Point3::origin())
}

/// Anomaly of `mesh` observed from `observation`.
///
/// Iterates the oriented faces once, combining each face's solid angle and
/// edge-integral vector with its outward normal, the magnetization and the
/// density into the six anomaly components. Faces are summed in index
/// order.
///
/// Meshes exported from one-based tools are detected by their minimum face
/// index and shifted transparently.
///
/// # Errors
///
/// - [`FieldError::InvalidIndex`] / [`FieldError::NormalCountMismatch`] /
///   [`FieldError::NonFiniteProperties`] for malformed input
/// - [`FieldError::SingularFacePlane`] / [`FieldError::ObservationOnVertex`]
///   / [`FieldError::DegenerateEdge`] when the observation point makes the
///   closed form singular
///
/// # Example
///
/// ```
/// use gravmag_field::{compute_anomaly_at, BodyProperties};
/// use gravmag_types::{unit_tetrahedron, Point3};
///
/// let body = BodyProperties::uniform_density(1000.0);
/// let anomaly =
///     compute_anomaly_at(&unit_tetrahedron(), &body, Point3::new(5.0, 5.0, 5.0)).unwrap();
///
/// // The body sits toward -x/-y/-z from the observation point.
/// assert!(anomaly.gx < 0.0 && anomaly.gy < 0.0 && anomaly.gz < 0.0);
/// ```
pub fn compute_anomaly_at(
    mesh: &OrientedMesh,
    body: &BodyProperties,
    observation: Point3<f64>,
) -> FieldResult<Anomaly> {
    let offset = validate(mesh, body)?;
    let m_scaled = MAGNETIC_SCALE * body.magnetization;
    let rho_g = body.density * GRAVITATIONAL_CONSTANT;

    let mut b = Vector3::zeros();
    let mut g = Vector3::zeros();
    for face in 0..mesh.faces.len() {
        let (fb, fg) = face_term(mesh, face, offset, observation, &m_scaled, rho_g)?;
        b += fb;
        g += fg;
    }

    debug!("anomaly assembled over {} faces", mesh.faces.len());
    Ok(Anomaly::from_sums(b, g))
}

/// Parallel variant of [`compute_anomaly_at`].
///
/// Face contributions are independent and purely additive, so they are
/// evaluated on the rayon thread pool and reduced with partial sums. The
/// reduction order is unspecified: results agree with the serial variant
/// only up to floating-point summation order, not bit-exactly.
///
/// # Errors
///
/// See [`compute_anomaly_at`].
pub fn compute_anomaly_par(
    mesh: &OrientedMesh,
    body: &BodyProperties,
    observation: Point3<f64>,
) -> FieldResult<Anomaly> {
    let offset = validate(mesh, body)?;
    let m_scaled = MAGNETIC_SCALE * body.magnetization;
    let rho_g = body.density * GRAVITATIONAL_CONSTANT;

    let (b, g) = (0..mesh.faces.len())
        .into_par_iter()
        .map(|face| face_term(mesh, face, offset, observation, &m_scaled, rho_g))
        .try_reduce(
            || (Vector3::zeros(), Vector3::zeros()),
            |acc, term| Ok((acc.0 + term.0, acc.1 + term.1)),
        )?;

    Ok(Anomaly::from_sums(b, g))
}

/// Check mesh and properties, returning the index-base offset to apply.
fn validate(mesh: &OrientedMesh, body: &BodyProperties) -> FieldResult<u32> {
    if mesh.normals.len() != mesh.faces.len() {
        return Err(FieldError::NormalCountMismatch {
            faces: mesh.faces.len(),
            normals: mesh.normals.len(),
        });
    }
    if !body.is_finite() {
        return Err(FieldError::NonFiniteProperties);
    }

    // One-based face arrays (common in externally produced meshes) are
    // recognized by their minimum index.
    let offset = u32::from(mesh.faces.iter().flatten().min() == Some(&1));

    for (face, indices) in mesh.faces.iter().enumerate() {
        for &index in indices {
            if ((index - offset) as usize) >= mesh.vertices.len() {
                return Err(FieldError::InvalidIndex {
                    face,
                    index,
                    vertex_count: mesh.vertices.len(),
                });
            }
        }
    }

    Ok(offset)
}

/// Magnetic and gravity contribution of a single face.
fn face_term(
    mesh: &OrientedMesh,
    face: usize,
    offset: u32,
    observation: Point3<f64>,
    m_scaled: &Vector3<f64>,
    rho_g: f64,
) -> FieldResult<(Vector3<f64>, Vector3<f64>)> {
    let [pi, qi, ri] = mesh.faces[face];
    let vp = mesh.vertices[(pi - offset) as usize] - observation;
    let vq = mesh.vertices[(qi - offset) as usize] - observation;
    let vr = mesh.vertices[(ri - offset) as usize] - observation;
    let normal = mesh.normals[face];

    // Reversed argument order relative to the winding is part of the sign
    // convention of the closed form.
    let mut omega = solid_angle(vr, vq, vp)?;
    let d = vp.dot(&normal);
    if d < 0.0 {
        omega = -d.signum() * omega;
    }

    let pqr = edge_integral(&[vp, vq, vr])?;

    let (l, m, n) = (normal.x, normal.y, normal.z);
    let shape = Vector3::new(
        l.mul_add(omega, n.mul_add(pqr.y, -(m * pqr.z))),
        m.mul_add(omega, l.mul_add(pqr.z, -(n * pqr.x))),
        n.mul_add(omega, m.mul_add(pqr.x, -(l * pqr.y))),
    );

    let pd = normal.dot(m_scaled);
    Ok((pd * shape, -(rho_g * d) * shape))
}
