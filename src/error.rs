use serde_json::error::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    /// Malformed JSON. The parser's message and position are kept as-is.
    #[error(transparent)]
    Syntax(serde_json::Error),

    /// Well-formed JSON whose shape does not match the expected type.
    #[error("type mismatch at `{path}`: {source}")]
    TypeMismatch {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),
}

impl PolicyError {
    /// Line reported by the JSON parser, if the error came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            PolicyError::Syntax(err) | PolicyError::TypeMismatch { source: err, .. } => {
                Some(err.line())
            }
            PolicyError::Encode(_) => None,
        }
    }

    /// Column reported by the JSON parser, if the error came from parsing.
    pub fn column(&self) -> Option<usize> {
        match self {
            PolicyError::Syntax(err) | PolicyError::TypeMismatch { source: err, .. } => {
                Some(err.column())
            }
            PolicyError::Encode(_) => None,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, PolicyError::Syntax(_))
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, PolicyError::TypeMismatch { .. })
    }
}

impl From<serde_json::Error> for PolicyError {
    fn from(err: serde_json::Error) -> Self {
        PolicyError::Syntax(err)
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for PolicyError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        let inner = err.into_inner();
        match inner.classify() {
            Category::Data => PolicyError::TypeMismatch {
                path,
                source: inner,
            },
            Category::Syntax | Category::Eof | Category::Io => PolicyError::Syntax(inner),
        }
    }
}
