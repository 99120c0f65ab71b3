/// Where a secret is loaded from
#[derive(Debug, Clone)]
pub enum SecretType {
    EnvVar { name: String },
}

impl SecretType {
    pub fn name(&self) -> &str {
        match self {
            SecretType::EnvVar { name } => name,
        }
    }
}

/// Loading rules for a single secret
pub struct SecretConfig {
    pub secret_type: SecretType,
    pub required: bool,
    /// Minimum length (None = no minimum)
    pub min_length: Option<usize>,
}

impl SecretConfig {
    pub fn new(secret_type: SecretType) -> Self {
        Self {
            secret_type,
            required: true,
            min_length: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }
}
