//! Embedded schema migrations, applied at startup.

use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not establish the migration connection.
    #[error("failed to connect for migrations: {message}")]
    Connect {
        /// Underlying connection error text.
        message: String,
    },
    /// A migration failed to apply.
    #[error("failed to run migrations: {message}")]
    Migrate {
        /// Underlying migration error text.
        message: String,
    },
    /// The blocking migration task was cancelled or panicked.
    #[error("migration task aborted: {message}")]
    Aborted {
        /// Join error text.
        message: String,
    },
}

/// Apply all pending migrations against the given database.
///
/// Runs on a blocking thread because the migration harness drives the
/// connection synchronously.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();

    tokio::task::spawn_blocking(move || {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&database_url)
            .map_err(|err| MigrationError::Connect {
                message: err.to_string(),
            })?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Migrate {
                message: err.to_string(),
            })?;

        if applied.is_empty() {
            info!("database schema is up to date");
        } else {
            info!(count = applied.len(), "applied pending migrations");
        }
        Ok(())
    })
    .await
    .map_err(|err| MigrationError::Aborted {
        message: err.to_string(),
    })?
}
