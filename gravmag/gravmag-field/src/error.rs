//! Error types for anomaly computation.

use thiserror::Error;

/// Result type alias for field operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors that can occur while evaluating the anomaly of a polyhedral body.
///
/// Geometric degeneracies are fatal to the whole call: a silently skipped
/// face would corrupt the physical result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The observation point lies in a face's plane in a configuration
    /// where the solid-angle denominator vanishes.
    #[error("observation point lies in a face plane: solid angle is singular")]
    SingularFacePlane,

    /// The observation point coincides with a mesh vertex.
    #[error("observation point coincides with a triangle vertex")]
    ObservationOnVertex,

    /// A face has a zero-length edge.
    #[error("zero-length edge in triangle")]
    DegenerateEdge,

    /// A face references a vertex outside the mesh.
    #[error("invalid vertex index {index} in face {face} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// Face that holds the bad reference.
        face: usize,
        /// The offending index, as stored in the mesh.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The mesh carries a different number of normals than faces.
    #[error("face/normal count mismatch: {faces} faces, {normals} normals")]
    NormalCountMismatch {
        /// Number of faces.
        faces: usize,
        /// Number of normals.
        normals: usize,
    },

    /// Magnetization or density is NaN or infinite.
    #[error("magnetization and density must be finite")]
    NonFiniteProperties,
}
