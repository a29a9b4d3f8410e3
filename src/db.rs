use anyhow::Result;
use surrealdb::engine::local::{Db, Mem, RocksDb};
use surrealdb::Surreal;

pub type DbConn = Surreal<Db>;

/// Open the local lead log with RocksDB backend
pub async fn connect(path: &str) -> Result<DbConn> {
    let db = Surreal::new::<RocksDb>(path).await?;
    db.use_ns("solar").use_db("leads").await?;
    Ok(db)
}

/// Throwaway in-memory log (tests, dry runs)
pub async fn connect_memory() -> Result<DbConn> {
    let db = Surreal::new::<Mem>(()).await?;
    db.use_ns("solar").use_db("leads").await?;
    Ok(db)
}

/// Initialize database schema
pub async fn init_schema(db: &DbConn) -> Result<()> {
    db.query(
        r#"
        -- Submitted leads, append-only
        DEFINE TABLE IF NOT EXISTS lead SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_lead_id ON lead FIELDS lead_id UNIQUE;
        DEFINE INDEX IF NOT EXISTS idx_stored_at ON lead FIELDS stored_at;

        -- Newsletter signups, append-only
        DEFINE TABLE IF NOT EXISTS newsletter_sub SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_sub_date ON newsletter_sub FIELDS date;
        "#,
    )
    .await?
    .check()?;

    Ok(())
}
