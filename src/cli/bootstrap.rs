// Bootstrap command implementation
// Creates the super administrator account on a fresh database

use std::sync::Arc;

use crate::app_data::AppData;
use crate::config::{init_database, BootstrapSettings};
use crate::errors::InternalError;
use crate::services::UserService;
use crate::types::db::user::{ADMIN, DEFAULT_PASSWORD};
use crate::types::dto::user::UserForm;
use crate::types::internal::RequestContext;

/// Bootstrap the system by creating the `admin` account
///
/// # Returns
/// * `Ok(())` - Account created, or it already existed
/// * `Err(...)` - Database or secret setup failed
pub async fn bootstrap_system(settings: BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== Fleetdesk Bootstrap ===\n");

    let db = init_database(&settings).await?;
    let app_data = Arc::new(AppData::init(db, settings).await?);

    if ensure_super_admin(app_data).await? {
        println!("Created super administrator '{}'", ADMIN);
        println!("Initial password is '{}'. Change it before going live.", DEFAULT_PASSWORD);
    } else {
        println!("Super administrator '{}' already exists, nothing to do", ADMIN);
    }

    Ok(())
}

/// Create the `admin` account with the default password when it is missing
///
/// # Returns
/// * `Ok(true)` - The account was created
/// * `Ok(false)` - The account already existed
pub async fn ensure_super_admin(app_data: Arc<AppData>) -> Result<bool, InternalError> {
    if app_data
        .user_store
        .find_by_login_name(&app_data.db, ADMIN)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    let ctx = RequestContext::for_cli("bootstrap");
    let form = UserForm {
        login_name: Some(ADMIN.to_string()),
        name: Some("Administrator".to_string()),
        ..UserForm::default()
    };

    let admin = UserService::new(app_data).save_or_update(&ctx, form, &[]).await?;
    tracing::info!("Super administrator created with id {}", admin.id);

    Ok(true)
}
