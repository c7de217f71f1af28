use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema, Statement,
    sea_query::TableCreateStatement, sqlx::sqlite::SqliteSynchronous,
};

use crate::{
    entities::{director, genre, movie},
    error::AppResult,
};

pub async fn connect_and_init(
    database_url: &str,
    max_connections: u32,
) -> AppResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(max_connections)
        .map_sqlx_sqlite_opts(|o| o.synchronous(SqliteSynchronous::Normal));
    let db = Database::connect(opts).await?;

    // journal_mode sticks to the database file; foreign_keys is already switched on
    // by sqlx for every pooled connection.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA journal_mode=WAL".to_string(),
    ))
    .await?;

    create_schema(&db).await?;
    Ok(db)
}

/// Creates any missing table from the entity definitions. Referenced tables come first.
pub async fn create_schema(db: &DatabaseConnection) -> AppResult<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, schema.create_table_from_entity(genre::Entity)).await?;
    create_table(db, schema.create_table_from_entity(director::Entity)).await?;
    create_table(db, schema.create_table_from_entity(movie::Entity)).await?;

    Ok(())
}

async fn create_table(db: &DatabaseConnection, mut stmt: TableCreateStatement) -> AppResult<()> {
    stmt.if_not_exists();
    db.execute(db.get_database_backend().build(&stmt)).await?;
    Ok(())
}

#[cfg(test)]
pub async fn memory() -> DatabaseConnection {
    connect_and_init("sqlite::memory:", 1).await.expect("in-memory database")
}
