/// Errors that can occur across Vigil.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; deriving [`miette::Diagnostic`] lets the binary crate propagate
/// it with `?` at the boundary.
///
/// # Examples
///
/// ```
/// use vigil_core::VigilError;
///
/// let err = VigilError::Config("OPEN_WEBUI_URL is not set".into());
/// assert!(err.to_string().contains("OPEN_WEBUI_URL"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum VigilError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Git command failure.
    #[error("git error: {0}")]
    Git(String),

    /// LLM API or response error.
    #[error("LLM error: {0}")]
    Llm(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: VigilError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = VigilError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn git_error_displays_message() {
        let err = VigilError::Git("fetch failed".into());
        assert_eq!(err.to_string(), "git error: fetch failed");
    }

    #[test]
    fn converts_into_miette_report() {
        // The binary relies on `?` doing this conversion for the fatal
        // configuration path.
        let err = VigilError::Config("missing required environment variables".into());
        let report: miette::Report = err.into();
        assert!(report
            .to_string()
            .contains("missing required environment variables"));
    }
}
