/// Errors that stop the host before or after a session runs.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("failed to read script {path}: {source}")]
    ReadScript {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("script line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
