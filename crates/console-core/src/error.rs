use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("glTF parse error: {0}")]
    Parse(#[from] gltf::Error),
    #[error("model has no scene")]
    NoScene,
    #[error("model contains no triangle geometry")]
    EmptyGeometry,
    #[error("primitive of `{mesh}` has no POSITION attribute")]
    MissingPositions { mesh: String },
}
