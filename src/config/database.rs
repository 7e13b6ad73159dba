//! Database connection and schema bootstrap using `SeaORM`.
//!
//! Connections come from a bounded pool sized by [`Settings`]. Table creation
//! is generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the SQL schema cannot drift from
//! the Rust structs. [`ensure_tables`] is the idempotent path used at server
//! startup; [`reset_tables`] is the destructive drop-then-create path used by
//! the one-shot loader binary.

use crate::config::settings::Settings;
use crate::entities::{Customer, Order, Product};
use crate::errors::Result;
use sea_orm::sea_query::Table;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityName, Schema,
};

/// Opens the store connection pool described by `settings`.
///
/// # Errors
/// Returns an error when the URL is malformed or the store is unreachable.
pub async fn connect(settings: &Settings) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(settings.database_url.clone());
    options.max_connections(settings.max_connections);

    Database::connect(options).await.map_err(Into::into)
}

/// Creates the customers, products, and orders tables if they do not exist.
///
/// Orders are created last so their foreign keys to the dimension tables
/// resolve. Safe to call on every startup.
///
/// # Errors
/// Returns an error if any DDL statement fails.
pub async fn ensure_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut customer_table = schema.create_table_from_entity(Customer);
    let mut product_table = schema.create_table_from_entity(Product);
    let mut order_table = schema.create_table_from_entity(Order);

    db.execute(builder.build(customer_table.if_not_exists()))
        .await?;
    db.execute(builder.build(product_table.if_not_exists()))
        .await?;
    db.execute(builder.build(order_table.if_not_exists())).await?;

    Ok(())
}

/// Drops and recreates all three tables, children before parents.
///
/// This is the loader's bootstrap: a reload replaces the whole dataset.
/// There is no partial-state recovery; a failure here aborts the process.
///
/// # Errors
/// Returns an error if any DDL statement fails.
pub async fn reset_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();

    for drop in [
        Table::drop().table(Order.table_ref()).if_exists().to_owned(),
        Table::drop().table(Product.table_ref()).if_exists().to_owned(),
        Table::drop()
            .table(Customer.table_ref())
            .if_exists()
            .to_owned(),
    ] {
        db.execute(builder.build(&drop)).await?;
    }

    ensure_tables(db).await
}
