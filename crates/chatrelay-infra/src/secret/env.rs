//! Environment variable credential source.
//!
//! Reads the provider API key from the process environment once at startup.
//! `.env` files are loaded into the environment by the binary before this
//! runs, so they are covered too.

use secrecy::SecretString;

/// Environment variable holding the Gemini API key.
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";

/// Read-only credential lookup backed by a single environment variable.
pub struct EnvCredentialSource {
    var: String,
}

impl EnvCredentialSource {
    /// Look the credential up in `var`.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the environment variable consulted.
    pub fn var_name(&self) -> &str {
        &self.var
    }

    /// Resolve the credential.
    ///
    /// Returns `None` when the variable is unset, not valid Unicode, or blank.
    pub fn resolve(&self) -> Option<SecretString> {
        match std::env::var(&self.var) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val.trim().to_string())),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                // Secrets must be valid strings; treat as absent rather than fail
                None
            }
        }
    }
}

impl Default for EnvCredentialSource {
    fn default() -> Self {
        Self::new(GOOGLE_API_KEY)
    }
}
