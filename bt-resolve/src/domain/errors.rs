//! Structured error types for bt-resolve
//!
//! Using thiserror for automatic Display implementation and error chaining.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to run {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {}", describe_exit(.code))]
    ToolFailed { tool: String, code: Option<i32> },

    #[error("Symbol resolution failed: {0}")]
    Symbolization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    /// Process exit code this error should map to
    ///
    /// A failing resolver tool hands its own exit code through.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            ResolveError::ToolFailed { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
