//! Core mesh types for polyhedral potential-field modeling.
//!
//! This crate provides the foundational type shared by the gravmag crates:
//!
//! - [`OrientedMesh`] - a closed triangle mesh with outward unit normals and
//!   its enclosed volume
//!
//! # Units
//!
//! All coordinates are `f64` in **meters**. The volume is in cubic meters.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Face winding is
//! **counter-clockwise (CCW) when viewed from outside** the body, so the
//! winding normal of every face agrees with its stored outward normal by the
//! right-hand rule.
//!
//! # Example
//!
//! ```
//! use gravmag_types::{unit_cube, OrientedMesh};
//!
//! let cube = unit_cube();
//! assert_eq!(cube.face_count(), 12);
//! assert!((cube.volume - 1.0).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod mesh;

pub use mesh::{unit_cube, unit_tetrahedron, OrientedMesh};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
