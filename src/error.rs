use thiserror::Error;

/// Malformed input tree. Not retried; the caller must fix the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("configuration tree exceeds maximum nesting depth {limit} at '{path}'")]
    DepthExceeded { path: String, limit: usize },

    #[error("artifact at the tree root reports no intrinsic name")]
    UnnamedRootArtifact,

    #[error("tree still contains an artifact at '{path}' — scrub it before converting")]
    UnscrubbedArtifact { path: String },
}

/// A single failed assertion, tagged with the fragment that declared it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{fragment}] {message}")]
pub struct AssertionFailure {
    pub fragment: String,
    pub message: String,
}

/// One or more assertions of active fragments failed.
///
/// Carries every failure, not just the first — configuration errors are fixed
/// in batches, so the whole set is reported in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("composition failed with {} assertion failure(s):\n{}", .failures.len(), list_failures(.failures))]
pub struct CompositionError {
    pub failures: Vec<AssertionFailure>,
}

fn list_failures(failures: &[AssertionFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("  - {f}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Error)]
pub enum DocfigError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error("schema error: {0}")]
    Schema(#[from] confique::Error),

    #[error("failed to parse payload for fragment '{fragment}': {source}")]
    PayloadParse {
        fragment: String,
        source: toml::de::Error,
    },

    #[error("unknown keys in payload for fragment '{fragment}': {keys:?}")]
    UnknownKeys { fragment: String, keys: Vec<String> },

    #[error("invalid value at '{path}': {reason}")]
    InvalidValue { path: String, reason: String },
}
