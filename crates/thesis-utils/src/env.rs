//! Environment variable helpers

use thiserror::Error;

/// Error for a required environment variable that is not set
#[derive(Debug, Error)]
#[error("{name} environment variable is not set")]
pub struct MissingEnvVar {
    /// Name of the missing variable
    pub name: String,
}

/// Read a required environment variable, failing with a descriptive error
///
/// Used at process start so missing credentials surface before any work
/// is scheduled.
pub fn require_env(name: &str) -> Result<String, MissingEnvVar> {
    std::env::var(name).map_err(|_| MissingEnvVar {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_var_message() {
        let err = require_env("THESIS_TEST_UNSET_VAR_XYZ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "THESIS_TEST_UNSET_VAR_XYZ environment variable is not set"
        );
    }
}
