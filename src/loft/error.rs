/// Reasons a loft configuration cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoftError {
    #[error("loft requires at least 2 segments, got {segments}")]
    TooFewSegments { segments: usize },
    #[error("profile requires at least 2 vertices, got {count}")]
    TooFewProfileVertices { count: usize },
    #[error("path requires at least 2 control points, got {count}")]
    TooFewControlPoints { count: usize },
}

impl LoftError {
    /// Whether the error comes from the authored configuration rather than the
    /// geometry. Every current variant does.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            Self::TooFewSegments { .. }
                | Self::TooFewProfileVertices { .. }
                | Self::TooFewControlPoints { .. }
        )
    }
}
