mod user;
pub use user::*;
mod category;
pub use category::*;
mod article;
pub use article::*;
mod comment;
pub use comment::*;
mod like;
pub use like::*;

use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

/// Open the pool, creating the database file when it does not exist yet.
///
/// Readers never block the single writer in WAL mode; writers queue on the busy timeout.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

pub async fn prepare_db(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(include_str!("sql/schema.sql"))
        .execute(pool)
        .await?;
    Ok(())
}
