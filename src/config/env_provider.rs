#[cfg(test)]
use std::collections::HashMap;

/// Source of environment variables for configuration loading
/// 
/// Settings and secrets read through this trait so tests can supply values
/// without touching the process environment.
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment for tests
#[cfg(test)]
#[derive(Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_vars(mut self, vars: &[(&str, &str)]) -> Self {
        for (key, value) in vars {
            self.vars.insert(key.to_string(), value.to_string());
        }
        self
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_environment_reads_process_env() {
        let provider = SystemEnvironment;

        unsafe {
            std::env::set_var("FLEETDESK_TEST_VAR_4711", "test_value");
        }

        assert_eq!(provider.get_var("FLEETDESK_TEST_VAR_4711"), Some("test_value".to_string()));
        assert_eq!(provider.get_var("FLEETDESK_NON_EXISTENT_4712"), None);

        unsafe {
            std::env::remove_var("FLEETDESK_TEST_VAR_4711");
        }
    }

    #[test]
    fn test_mock_environment_builders() {
        let provider = MockEnvironment::empty()
            .with_var("DATABASE_URL", "sqlite::memory:")
            .with_vars(&[("HOST", "127.0.0.1"), ("PORT", "8080")]);

        assert_eq!(provider.get_var("DATABASE_URL"), Some("sqlite::memory:".to_string()));
        assert_eq!(provider.get_var("HOST"), Some("127.0.0.1".to_string()));
        assert_eq!(provider.get_var("PORT"), Some("8080".to_string()));
        assert_eq!(provider.get_var("EPSG_SCHEMA"), None);
    }

    #[test]
    fn test_mock_environment_later_value_wins() {
        let provider = MockEnvironment::new(HashMap::from([("PORT".to_string(), "1".to_string())]))
            .with_var("PORT", "2");

        assert_eq!(provider.get_var("PORT"), Some("2".to_string()));
    }
}
