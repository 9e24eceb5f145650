use sea_orm::sea_query::{Index, IndexCreateStatement, TableCreateStatement};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema,
};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entity::{
    inventory, message, operation, operation_participant, product, transaction, user, warehouse,
};

/// Initialize database connection and auto-migrate tables
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let database_url = config.connection_url();

    info!("Connecting to database: {}:{}/{}", config.host, config.port, config.name);

    let mut opt = ConnectOptions::new(&database_url);
    opt.max_connections(config.max_connections)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug)
        .set_schema_search_path("public");

    let db = Database::connect(opt).await?;
    info!("Database connection established");

    auto_migrate(&db).await?;

    Ok(db)
}

/// Create every table and index the application needs, skipping existing ones
pub async fn auto_migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Running auto-migration for all entities...");

    // 1. Independent tables first
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(user::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(product::Entity)).await?;

    // 2. Tables referencing users / products
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(warehouse::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(operation::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(message::Entity)).await?;

    // 3. Tables referencing the above
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(inventory::Entity)).await?;
    create_table_if_not_exists(
        db,
        backend,
        schema.create_table_from_entity(operation_participant::Entity),
    )
    .await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(transaction::Entity)).await?;

    // 4. Indexes
    create_index_if_not_exists(
        db,
        backend,
        Index::create()
            .name("uk_inventory_product_warehouse")
            .table(inventory::Entity)
            .col(inventory::Column::ProductId)
            .col(inventory::Column::WarehouseId)
            .unique()
            .to_owned(),
    )
    .await?;

    info!("Auto-migration completed successfully");
    Ok(())
}

/// Create a table if it doesn't exist
async fn create_table_if_not_exists(
    db: &DatabaseConnection,
    backend: DbBackend,
    mut stmt: TableCreateStatement,
) -> Result<(), DbErr> {
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

/// Create an index if it doesn't exist
async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    backend: DbBackend,
    mut stmt: IndexCreateStatement,
) -> Result<(), DbErr> {
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

/// Fresh in-memory database with the full schema, for tests
#[cfg(test)]
pub async fn test_db() -> DatabaseConnection {
    // Each pooled connection would open its own empty in-memory database
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("connect sqlite");
    auto_migrate(&db).await.expect("migrate sqlite");
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_auto_migrate_is_idempotent() {
        let db = test_db().await;
        auto_migrate(&db).await.unwrap();
        let users = user::Entity::find().all(&db).await.unwrap();
        assert!(users.is_empty());
    }
}
