#![cfg(test)]
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use configs::DatabaseConfig;

// Create the table only once across the whole test process
static TABLE_READY: OnceCell<bool> = OnceCell::const_new();

/// Fresh connection to the scratch database, or `None` when tests should skip.
pub async fn get_db() -> Option<DatabaseConnection> {
    let _ = dotenvy::dotenv();
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let cfg = DatabaseConfig::from_env().ok()?;
    let ready = *TABLE_READY
        .get_or_init(|| async {
            match models::db::connect(&cfg).await {
                Ok(db) => {
                    let ok = models::db::ensure_table(&db).await.is_ok();
                    let _ = db.close().await;
                    ok
                }
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {e}");
                    false
                }
            }
        })
        .await;
    if !ready {
        return None;
    }
    models::db::connect(&cfg).await.ok()
}

pub fn fresh_id() -> i32 {
    ((uuid::Uuid::new_v4().as_u128() as u32) >> 1) as i32
}
