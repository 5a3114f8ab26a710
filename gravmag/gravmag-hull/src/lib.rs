//! Convex hull triangulation for polyhedral potential-field modeling.
//!
//! This crate derives an outward-consistently-oriented triangular surface
//! mesh from an unordered 3-D point cloud:
//!
//! - **Hull construction**: incremental beneath-beyond convex hull
//! - **Orientation fix-up**: winding order and stored normals are made
//!   mutually consistent and outward-pointing for every face
//! - **Volume**: enclosed volume by the divergence theorem
//!
//! The output [`OrientedMesh`] keeps the raw input coordinates as its vertex
//! array; faces index into it, and interior points are simply never
//! referenced.
//!
//! # Example
//!
//! ```
//! use gravmag_hull::triangulate;
//! use gravmag_types::Point3;
//!
//! // Cube corners plus an interior point that must not appear on the hull.
//! let mut points = vec![Point3::new(0.5, 0.5, 0.5)];
//! for x in [0.0, 1.0] {
//!     for y in [0.0, 1.0] {
//!         for z in [0.0, 1.0] {
//!             points.push(Point3::new(x, y, z));
//!         }
//!     }
//! }
//!
//! let mesh = triangulate(&points).unwrap();
//! assert_eq!(mesh.face_count(), 12);
//! assert!((mesh.volume - 1.0).abs() < 1e-9);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod hull;

pub use error::{HullError, HullResult};
pub use hull::triangulate;

// Re-export the mesh type produced by this crate
pub use gravmag_types::OrientedMesh;
