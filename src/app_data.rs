use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{BootstrapSettings, SecretManager};
use crate::errors::InternalError;
use crate::services::PasswordHasher;
use crate::stores::{GroupStore, RoleStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// Everything is created once in main.rs and shared across services.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(db, settings)
///   ↓ creates once
///   ├─ db (DatabaseConnection)
///   ├─ settings (Arc<BootstrapSettings>)
///   ├─ secret_manager (Arc<SecretManager>)
///   ├─ password_hasher (Arc<PasswordHasher>)
///   ├─ user_store / role_store / group_store
///   ↓ wrapped in Arc<AppData>
///   ├─ UserService::new(app_data)
///   └─ StatService::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Arc<BootstrapSettings>,
    pub secret_manager: Arc<SecretManager>,
    pub password_hasher: Arc<PasswordHasher>,
    pub user_store: Arc<UserStore>,
    pub role_store: Arc<RoleStore>,
    pub group_store: Arc<GroupStore>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when the password pepper cannot be loaded
    pub async fn init(db: DatabaseConnection, settings: BootstrapSettings) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        tracing::debug!("Initializing secret manager...");
        let secret_manager = SecretManager::init()
            .map_err(|e| InternalError::parse("secret_manager", format!("Secret manager init failed: {}", e)))?;
        tracing::debug!("Secret manager initialized");

        let app_data = Self::with_secret_manager(db, settings, secret_manager);

        tracing::info!("AppData initialized successfully");
        Ok(app_data)
    }

    /// Build AppData around an already loaded secret manager
    pub fn with_secret_manager(
        db: DatabaseConnection,
        settings: BootstrapSettings,
        secret_manager: SecretManager,
    ) -> Self {
        let password_hasher = Arc::new(PasswordHasher::new(secret_manager.pepper()));

        Self {
            db,
            settings: Arc::new(settings),
            secret_manager: Arc::new(secret_manager),
            password_hasher,
            user_store: Arc::new(UserStore::new()),
            role_store: Arc::new(RoleStore::new()),
            group_store: Arc::new(GroupStore::new()),
        }
    }
}
