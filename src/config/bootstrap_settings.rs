use std::fmt;
use std::sync::Arc;
use crate::config::errors::ApplicationError;
use crate::config::config_spec::ConfigSpec;
use crate::config::EnvironmentProvider;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://fleetdesk.db?mode=rwc";

/// Infrastructure settings resolved once at startup
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    epsg_schema: Option<String>,
    default_page_size: u64,
}

impl BootstrapSettings {
    /// Load bootstrap settings through the given environment provider
    pub fn from_env_provider(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Result<Self, ApplicationError> {
        let database_url_spec = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value(DEFAULT_DATABASE_URL)
            .min_length(1);

        let host_spec = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address);

        let port_spec = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535));

        let epsg_schema_spec = ConfigSpec::new(env_provider.clone())
            .env_override("EPSG_SCHEMA")
            .max_length(63);

        let page_size_spec = ConfigSpec::new(env_provider)
            .env_override("DEFAULT_PAGE_SIZE")
            .default_value("20")
            .validator(|value| ConfigSpec::validate_integer_range(value, 1, 500));

        let database_url = database_url_spec.load_setting_with_source()?.value;
        let server_host = host_spec.load_setting_with_source()?.value;

        let port_value = port_spec.load_setting_with_source()?.value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        // An unset or blank schema means unqualified EPSG table names
        let epsg_schema = Some(epsg_schema_spec.load_setting_with_source()?.value)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let page_size_value = page_size_spec.load_setting_with_source()?.value;
        let default_page_size = ConfigSpec::parse_integer(&page_size_value, "DEFAULT_PAGE_SIZE")? as u64;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            epsg_schema,
            default_page_size,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn epsg_schema(&self) -> Option<&str> {
        self.epsg_schema.as_deref()
    }

    pub fn default_page_size(&self) -> u64 {
        self.default_page_size
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("epsg_schema", &self.epsg_schema)
            .field("default_page_size", &self.default_page_size)
            .finish()
    }
}
