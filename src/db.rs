use crate::conf::DbConf;
use anyhow::Result;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::info;

pub fn pool(conf: &DbConf) -> Result<Pool<SqliteConnectionManager>> {
    info!(db_url = %conf.url, "Opening database");
    let manager = SqliteConnectionManager::file(&conf.url);
    let pool = Pool::new(manager)?;
    create_schema(&*pool.get()?)?;
    Ok(pool)
}

pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    info!("Preparing schema");
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS exchange_rate (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bid TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
}
