use thiserror::Error;

pub type Result<T> = std::result::Result<T, PickError>;

#[derive(Debug, Error)]
pub enum PickError {
    #[error("log source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    #[error("no commit in the log is marked as the current checkout")]
    NoCurrentCheckout,

    #[error("could not find a commit or branch name in log line {line:?}")]
    UnresolvableReference { line: String },

    #[error("checkout of {reference:?} failed, exit_code={exit_code:?}, stderr={stderr}")]
    CheckoutFailed {
        reference: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("I/O failure while {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl PickError {
    pub fn io(operation: &'static str, source: std::io::Error) -> Self {
        Self::Io { operation, source }
    }

    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            reason: reason.into(),
        }
    }
}
