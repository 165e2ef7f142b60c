//! Runtime configuration for the HTTP server, resolved from settings.

use std::net::SocketAddr;

use color_eyre::eyre::{Context, Result};
use tracing::info;

use contact_manager::outbound::persistence::{DbPool, run_pending_migrations};
use contact_manager::settings::ServerSettings;

/// Listener address plus the contact store backing the service.
///
/// Without a pool the server keeps contacts in memory for the lifetime of
/// the process.
pub struct ServerConfig {
    bind_addr: SocketAddr,
    db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Serve from an empty in-memory store on `bind_addr`.
    #[must_use]
    pub fn in_memory(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Resolve the listener and store from loaded settings.
    ///
    /// A configured database URL is migrated (unless disabled) and pooled
    /// before the server starts, so connection problems abort startup rather
    /// than surfacing on the first request.
    ///
    /// # Errors
    ///
    /// Fails when the bind address does not parse, migrations cannot be
    /// applied, or the pool cannot be built.
    pub async fn from_settings(settings: &ServerSettings) -> Result<Self> {
        let bind_addr = settings
            .bind_addr()
            .wrap_err("invalid CONTACTS_BIND_ADDR")?;
        let Some(database_url) = settings.database_url() else {
            return Ok(Self::in_memory(bind_addr));
        };

        if settings.run_migrations() {
            run_pending_migrations(database_url)
                .await
                .wrap_err("failed to apply database migrations")?;
        } else {
            info!("skipping database migrations");
        }
        let pool = DbPool::new(settings.pool_config(database_url))
            .await
            .wrap_err("failed to build database pool")?;

        Ok(Self {
            bind_addr,
            db_pool: Some(pool),
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    pub(super) fn db_pool(&self) -> Option<&DbPool> {
        self.db_pool.as_ref()
    }
}
