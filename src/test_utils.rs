//! Shared test utilities for `SalesInsights`.
//!
//! This module provides common helper functions for setting up test databases
//! and seeding customers, products, and orders with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::core::OrderLine;
use crate::entities::{customer, order, product};
use crate::errors::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeUtc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::ensure_tables(&db).await?;
    Ok(db)
}

/// Parses a decimal literal; test-only shorthand.
pub fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

/// Parses `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD` into a UTC timestamp.
pub fn utc_datetime(value: &str) -> DateTimeUtc {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .unwrap()
                .and_time(NaiveTime::MIN)
        })
        .and_utc()
}

/// Inserts a customer row with placeholder contact details.
pub async fn insert_customer(
    db: &DatabaseConnection,
    customer_id: &str,
    name: &str,
) -> Result<customer::Model> {
    customer::ActiveModel {
        customer_id: Set(customer_id.to_string()),
        name: Set(name.to_string()),
        email: Set(format!("{}@example.com", customer_id.to_lowercase())),
        address: Set("1 Test Street".to_string()),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts a product row.
pub async fn insert_product(
    db: &DatabaseConnection,
    product_id: &str,
    name: &str,
    category: &str,
) -> Result<product::Model> {
    product::ActiveModel {
        product_id: Set(product_id.to_string()),
        name: Set(name.to_string()),
        category: Set(category.to_string()),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts an order row.
///
/// # Arguments
/// * `date` - `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
/// * `price`, `discount`, `shipping` - decimal literals
#[allow(clippy::too_many_arguments)]
pub async fn insert_order(
    db: &DatabaseConnection,
    order_id: i64,
    product_id: &str,
    customer_id: &str,
    region: &str,
    date: &str,
    quantity: i32,
    price: &str,
    discount: &str,
    shipping: &str,
) -> Result<order::Model> {
    order::ActiveModel {
        order_id: Set(order_id),
        product_id: Set(product_id.to_string()),
        customer_id: Set(customer_id.to_string()),
        region: Set(region.to_string()),
        date_of_sale: Set(utc_datetime(date)),
        quantity_sold: Set(quantity),
        unit_price: Set(dec(price)),
        discount: Set(dec(discount)),
        shipping_cost: Set(dec(shipping)),
        payment_method: Set("Credit Card".to_string()),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Builds an [`OrderLine`] with the given sale facts and placeholder
/// dimension attributes. Tests override the fields they assert on.
pub fn order_line(order_id: i64, quantity: i32, price: &str, discount: &str) -> OrderLine {
    OrderLine {
        order_id,
        customer_id: "C1".to_string(),
        customer_name: "Test Customer".to_string(),
        product_id: "P1".to_string(),
        product_name: "Test Product".to_string(),
        category: "Gadgets".to_string(),
        region: "North".to_string(),
        date_of_sale: utc_datetime("2024-01-15"),
        quantity_sold: quantity,
        unit_price: dec(price),
        discount: dec(discount),
        shipping_cost: Decimal::ZERO,
    }
}
