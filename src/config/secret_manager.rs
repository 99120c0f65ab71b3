use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use crate::config::{EnvironmentProvider, SecretConfig, SecretType, SystemEnvironment};

pub const PASSWORD_PEPPER_VAR: &str = "PASSWORD_PEPPER";

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength { secret_name: String, expected: usize, actual: usize },
}

/// Holds the secrets the application needs at runtime
pub struct SecretManager {
    pepper: String,
}

impl SecretManager {
    /// Load secrets from the process environment
    pub fn init() -> Result<Self, SecretError> {
        Self::init_with(Arc::new(SystemEnvironment))
    }

    /// Load and validate every secret through the given provider
    /// 
    /// # Errors
    /// Returns `SecretError` if a required secret is missing or too short
    pub fn init_with(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Result<Self, SecretError> {
        let pepper = Self::load_secret(env_provider.as_ref(), &Self::pepper_config())?;

        Ok(Self { pepper })
    }

    /// Build a manager from a known pepper
    pub fn from_pepper(pepper: impl Into<String>) -> Self {
        Self { pepper: pepper.into() }
    }

    fn pepper_config() -> SecretConfig {
        SecretConfig::new(SecretType::EnvVar {
            name: PASSWORD_PEPPER_VAR.to_string(),
        })
        .required(true)
        .min_length(16)
    }

    /// Pepper used as the Argon2 secret for password hashing
    pub fn pepper(&self) -> &str {
        &self.pepper
    }

    pub(crate) fn load_secret(
        env_provider: &(dyn EnvironmentProvider + Send + Sync),
        config: &SecretConfig,
    ) -> Result<String, SecretError> {
        let name = config.secret_type.name();
        let value = match &config.secret_type {
            SecretType::EnvVar { name } => match env_provider.get_var(name) {
                Some(v) => v,
                None if !config.required => return Ok(String::new()),
                None => {
                    return Err(SecretError::Missing {
                        secret_name: name.clone(),
                    })
                }
            },
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(SecretError::InvalidLength {
                    secret_name: name.to_string(),
                    expected: min_len,
                    actual: value.len(),
                });
            }
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("pepper", &"<redacted>")
            .finish()
    }
}
