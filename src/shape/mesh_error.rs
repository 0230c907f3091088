/// Error indicating that a face or mesh cannot be built from the given data.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// The face has no area so its normal cannot be computed.
    #[error("The face is degenerate, its normal cannot be computed.")]
    DegenerateFace,
    /// A tessellation index does not designate a vertex of the face.
    #[error("Face vertex index {index} is out of bounds (the face has {len} vertices).")]
    FaceVertexOutOfBounds {
        /// The offending index.
        index: u32,
        /// The number of vertices of the face.
        len: usize,
    },
    /// A face vertex does not designate a vertex of the mesh.
    #[error("Vertex coordinate index {index} is out of bounds (the mesh has {len} vertices).")]
    CoordinateOutOfBounds {
        /// The offending index.
        index: u32,
        /// The number of vertices of the mesh.
        len: usize,
    },
    /// A tessellation primitive has a number of indices incompatible with its kind.
    #[error("A {kind} cannot be made of {len} vertex indices.")]
    InvalidPrimitive {
        /// The kind of primitive.
        kind: &'static str,
        /// The number of indices it was given.
        len: usize,
    },
    /// An outline has less than two vertices.
    #[error("An outline needs at least two vertices, found {len}.")]
    InvalidOutline {
        /// The number of indices it was given.
        len: usize,
    },
    /// A face must contain at least one vertex.
    #[error("A face must contain at least one vertex.")]
    EmptyFace,
}
