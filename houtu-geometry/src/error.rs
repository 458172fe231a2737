#[derive(thiserror::Error, Debug)]
pub enum GeometryError {
    /// The caller passed something unusable: a missing or inverted rectangle,
    /// a non-positive granularity, a malformed packed array.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The inputs were well formed but describe a footprint that cannot be
    /// tessellated, such as a rotated rectangle crossing a pole.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("could not parse geometry options: {0}")]
    Options(#[from] serde_json::Error),
}
