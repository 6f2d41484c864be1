use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::debug;

use configs::DatabaseConfig;

use crate::{errors::ModelError, wish};

/// Open a single-connection pool for one invocation.
/// The caller owns the handle and closes it when the request is done.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(1)
        .min_connections(1)
        .connect_timeout(cfg.connect_timeout())
        .acquire_timeout(cfg.connect_timeout())
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    debug!(event = "db_connected", "database connection opened");
    Ok(db)
}

/// Create `twishes` from the entity definition if it does not exist yet.
/// Only used to prepare scratch databases; deployed tables are managed outside this crate.
pub async fn ensure_table<C: ConnectionTrait>(db: &C) -> Result<(), ModelError> {
    let backend = db.get_database_backend();
    let stmt = Schema::new(backend)
        .create_table_from_entity(wish::Entity)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&stmt))
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
