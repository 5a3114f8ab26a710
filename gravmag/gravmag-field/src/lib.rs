//! Gravity and magnetic anomaly of a homogeneous polyhedral body.
//!
//! Classical closed-form potential theory for uniformly magnetized,
//! uniform-density polyhedra: each triangular face of an outward-oriented
//! mesh contributes a solid-angle term and a logarithmic edge-integral
//! term, summed into the six anomaly components at a single observation
//! point.
//!
//! - [`solid_angle`] - signed solid angle a triangle subtends at the
//!   observation point
//! - [`edge_integral`] - logarithmic line-integral vector over a
//!   triangle's three edges
//! - [`compute_anomaly`] / [`compute_anomaly_at`] - per-face assembly of
//!   the magnetic flux density (tesla) and gravitational acceleration
//!   (m/s²)
//! - [`compute_anomaly_par`] - rayon-parallel variant of the assembly
//!
//! # Units
//!
//! Coordinates in meters, magnetization in A/m, density in kg/m³; magnetic
//! output in tesla, gravity output in m/s². The gravitational constant is
//! pinned to a historical value for compatibility with the classical
//! formulation (see [`constants`]).
//!
//! # Example
//!
//! ```
//! use gravmag_field::{compute_anomaly_at, BodyProperties};
//! use gravmag_types::{unit_cube, Point3};
//!
//! // A symmetric body observed from its center produces no net anomaly.
//! let body = BodyProperties::uniform_density(1000.0);
//! let anomaly = compute_anomaly_at(&unit_cube(), &body, Point3::origin()).unwrap();
//!
//! assert!(anomaly.gravity().norm() < 1e-15);
//! assert!(anomaly.magnetic().norm() < 1e-15);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod anomaly;
pub mod constants;
mod edge_integral;
mod error;
mod solid_angle;

pub use anomaly::{
    compute_anomaly, compute_anomaly_at, compute_anomaly_par, Anomaly, BodyProperties,
};
pub use edge_integral::edge_integral;
pub use error::{FieldError, FieldResult};
pub use solid_angle::solid_angle;

// Re-export the mesh type consumed by this crate
pub use gravmag_types::OrientedMesh;
