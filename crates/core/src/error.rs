//! Error types for relkit operations.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for relkit operations.
///
/// Each variant corresponds to one stage of a tool's installation
/// pipeline. Errors are caught at the single-tool boundary by the
/// orchestrator; they never abort the batch.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// A requested tool name has no known configuration.
    #[error("No configuration found for '{tool}'")]
    #[diagnostic(code(relkit::config::missing))]
    ConfigurationMissing {
        /// The tool name that was requested but not configured
        tool: String,
    },

    /// The latest-version lookup against the release index failed.
    #[error("Failed to resolve latest release of {repo}: {message}")]
    #[diagnostic(code(relkit::upstream::unavailable))]
    UpstreamUnavailable {
        /// The `org/repo` pair that was queried
        repo: String,
        /// What went wrong (network error, bad status, missing tag)
        message: String,
    },

    /// The release asset could not be fetched.
    #[error("Failed to download {url}: {message}")]
    #[diagnostic(code(relkit::download::failed))]
    DownloadFailed {
        /// The asset URL that was requested
        url: String,
        /// What went wrong (network error or non-success status)
        message: String,
    },

    /// The downloaded archive could not be unpacked.
    #[error("Failed to extract archive: {message}")]
    #[diagnostic(code(relkit::extract::failed))]
    ExtractFailed {
        /// What went wrong (corrupt or unsupported archive)
        message: String,
    },

    /// The tool's post-install action failed.
    ///
    /// The binary itself was installed, but a hook failure is treated
    /// as the whole tool's installation failure.
    #[error("Post-install action for '{tool}' failed: {message}")]
    #[diagnostic(code(relkit::post_install::failed))]
    PostInstallFailed {
        /// The tool whose hook failed
        tool: String,
        /// Spawn error or non-zero exit description
        message: String,
    },

    /// I/O error with operation context.
    #[error("I/O error during {operation}: {source}")]
    #[diagnostic(code(relkit::io::error))]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Description of the operation that failed
        operation: String,
    },

    /// The invoking environment is missing something relkit requires.
    #[error("Environment error: {message}")]
    #[diagnostic(code(relkit::environment::invalid))]
    Environment {
        /// The error message describing the environment issue
        message: String,
    },
}

impl Error {
    /// Create a [`Error::ConfigurationMissing`] for a tool name.
    pub fn configuration_missing(tool: impl Into<String>) -> Self {
        Self::ConfigurationMissing { tool: tool.into() }
    }

    /// Create a [`Error::UpstreamUnavailable`] for an `org/repo` pair.
    pub fn upstream_unavailable(repo: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            repo: repo.into(),
            message: message.into(),
        }
    }

    /// Create a [`Error::DownloadFailed`] for an asset URL.
    pub fn download_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a [`Error::ExtractFailed`].
    pub fn extract_failed(message: impl Into<String>) -> Self {
        Self::ExtractFailed {
            message: message.into(),
        }
    }

    /// Create a [`Error::PostInstallFailed`] for a tool.
    pub fn post_install_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PostInstallFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a [`Error::Io`] with operation context.
    pub fn io(source: std::io::Error, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            operation: operation.into(),
        }
    }

    /// Create a [`Error::Environment`].
    pub fn environment(message: impl Into<String>) -> Self {
        Self::Environment {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            operation: "filesystem operation".to_string(),
        }
    }
}

/// Result type alias for relkit operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_tool() {
        let err = Error::configuration_missing("suave-geth");
        assert_eq!(err.to_string(), "No configuration found for 'suave-geth'");

        let err = Error::post_install_failed("builder-playground", "exit status 1");
        assert!(err.to_string().contains("builder-playground"));
        assert!(err.to_string().contains("exit status 1"));
    }

    #[test]
    fn test_download_failed_carries_url() {
        let err = Error::download_failed("https://example.com/x.zip", "HTTP 404");
        assert!(err.to_string().contains("https://example.com/x.zip"));
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_io_from_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { .. }));
    }
}
