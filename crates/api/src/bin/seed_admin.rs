//! Create or reset the dashboard administrator account.
//!
//! | Env Var          | Required | Default          |
//! |------------------|----------|------------------|
//! | `DATABASE_URL`   | **yes**  | --               |
//! | `ADMIN_EMAIL`    | **yes**  | --               |
//! | `ADMIN_PASSWORD` | **yes**  | --               |
//! | `ADMIN_NAME`     | no       | `Administrador`  |
//! | `ADMIN_ROLE`     | no       | `global_admin`   |

use anyhow::{bail, Context};
use survey_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use survey_core::roles::{is_valid_role, ROLE_GLOBAL_ADMIN};
use survey_db::models::user::UpsertUser;
use survey_db::{PgStore, UserStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed_admin=info,survey_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let email = std::env::var("ADMIN_EMAIL").context("ADMIN_EMAIL must be set")?;
    let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
    let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrador".into());
    let role = std::env::var("ADMIN_ROLE").unwrap_or_else(|_| ROLE_GLOBAL_ADMIN.into());

    let email = email.trim().to_string();
    if email.is_empty() || !email.contains('@') {
        bail!("ADMIN_EMAIL must be an email address");
    }
    if !is_valid_role(&role) {
        bail!("ADMIN_ROLE must be one of the known roles, got '{role}'");
    }
    if let Err(msg) = validate_password_strength(&password, MIN_PASSWORD_LENGTH) {
        bail!(msg);
    }

    let pool = survey_db::create_pool(&database_url, 1)
        .await
        .context("Failed to connect to database")?;
    survey_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Password hashing failed: {e}"))?;

    let store = PgStore::new(pool);
    let user = store
        .upsert_user(&UpsertUser {
            name,
            email,
            password_hash,
            role,
        })
        .await
        .context("Failed to save admin user")?;

    tracing::info!(user_id = %user.id, email = %user.email, role = %user.role, "Admin account ready");
    store.close().await;
    Ok(())
}
