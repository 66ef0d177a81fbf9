use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by scenario construction, configuration loading and runs.
///
/// Near-zero separations are not an error: the force model clamps the
/// distance and carries on.
#[derive(Debug, Error)]
pub enum Error {
    /// Scenario identifier is not one of the recognized set.
    #[error("unknown scenario: {0:?}")]
    UnknownScenario(String),

    /// Invalid run, world or particle parameter (rejected before any stepping).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid YAML for the expected schema.
    #[error("config: {0}")]
    Config(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParameter("mass must be finite and > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("mass"));

        let e = Error::UnknownScenario("lava".into());
        assert_eq!(e.to_string(), "unknown scenario: \"lava\"");
    }
}
