//! One-shot CSV bulk loader.
//!
//! Streams the sales CSV, keeps the first occurrence of each customer and
//! product key, accumulates transformed order rows, then bulk-inserts the
//! three tables in dependency order so foreign keys resolve. Any parse
//! failure aborts the load before anything is written; the inserts across
//! the three tables are not transactional.

use crate::entities::{customer, order, product};
use crate::errors::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeUtc;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

// SQLite caps bound parameters per statement, so order rows insert in batches.
const INSERT_BATCH: usize = 500;

/// Row counts from a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Distinct customers inserted
    pub customers: usize,
    /// Distinct products inserted
    pub products: usize,
    /// Order rows inserted
    pub orders: usize,
}

/// One CSV record in the fixed export layout.
///
/// Money columns come in as strings and are parsed explicitly so a malformed
/// value names the offending field instead of surfacing as a float artifact.
#[derive(Debug, Deserialize)]
struct SalesRecord {
    #[serde(rename = "Order ID")]
    order_id: i64,
    #[serde(rename = "Product ID")]
    product_id: String,
    #[serde(rename = "Customer ID")]
    customer_id: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Date of Sale")]
    date_of_sale: String,
    #[serde(rename = "Quantity Sold")]
    quantity_sold: i32,
    #[serde(rename = "Unit Price")]
    unit_price: String,
    #[serde(rename = "Discount")]
    discount: String,
    #[serde(rename = "Shipping Cost")]
    shipping_cost: String,
    #[serde(rename = "Payment Method")]
    payment_method: String,
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Customer Email")]
    customer_email: String,
    #[serde(rename = "Customer Address")]
    customer_address: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Category")]
    category: String,
}

/// Loads the CSV at `path` into the database.
///
/// Call [`crate::config::database::reset_tables`] first for a clean import;
/// this function only appends.
///
/// # Errors
/// Returns an error if the file cannot be opened, any record fails to parse,
/// or an insert fails.
pub async fn load_csv(db: &DatabaseConnection, path: impl AsRef<Path>) -> Result<LoadReport> {
    let file = File::open(path.as_ref())?;
    load_from_reader(db, file).await
}

/// Same as [`load_csv`] but over any reader; tests feed CSV text directly.
///
/// # Errors
/// Returns an error if any record fails to parse or an insert fails.
pub async fn load_from_reader<R: Read>(db: &DatabaseConnection, input: R) -> Result<LoadReport> {
    let mut reader = csv::Reader::from_reader(input);

    let mut seen_customers = HashSet::new();
    let mut seen_products = HashSet::new();
    let mut customers = Vec::new();
    let mut products = Vec::new();
    let mut orders = Vec::new();

    for record in reader.deserialize() {
        let record: SalesRecord = record?;

        // First occurrence of a dimension key wins; later rows repeating the
        // same customer or product are only order facts.
        if seen_customers.insert(record.customer_id.clone()) {
            customers.push(customer::ActiveModel {
                customer_id: Set(record.customer_id.clone()),
                name: Set(record.customer_name.clone()),
                email: Set(record.customer_email.clone()),
                address: Set(record.customer_address.clone()),
            });
        }

        if seen_products.insert(record.product_id.clone()) {
            products.push(product::ActiveModel {
                product_id: Set(record.product_id.clone()),
                name: Set(record.product_name.clone()),
                category: Set(record.category.clone()),
            });
        }

        orders.push(order::ActiveModel {
            order_id: Set(record.order_id),
            product_id: Set(record.product_id),
            customer_id: Set(record.customer_id),
            region: Set(record.region),
            date_of_sale: Set(parse_sale_date(&record.date_of_sale)?),
            quantity_sold: Set(record.quantity_sold),
            unit_price: Set(parse_money("Unit Price", &record.unit_price)?),
            discount: Set(parse_money("Discount", &record.discount)?),
            shipping_cost: Set(parse_money("Shipping Cost", &record.shipping_cost)?),
            payment_method: Set(record.payment_method),
        });
    }

    let report = LoadReport {
        customers: customers.len(),
        products: products.len(),
        orders: orders.len(),
    };
    info!(
        customers = report.customers,
        products = report.products,
        orders = report.orders,
        "CSV processed"
    );

    // Dependency order: dimensions before facts.
    if !customers.is_empty() {
        customer::Entity::insert_many(customers).exec(db).await?;
    }
    if !products.is_empty() {
        product::Entity::insert_many(products).exec(db).await?;
    }
    for batch in orders.chunks(INSERT_BATCH) {
        order::Entity::insert_many(batch.to_vec()).exec(db).await?;
    }

    info!("Data inserted");
    Ok(report)
}

fn parse_money(field: &'static str, value: &str) -> Result<Decimal> {
    value.trim().parse().map_err(|_| Error::MalformedField {
        field,
        value: value.to_string(),
    })
}

/// Accepts `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD` (midnight).
fn parse_sale_date(value: &str) -> Result<DateTimeUtc> {
    let trimmed = value.trim();
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(datetime.and_utc());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| Error::MalformedField {
            field: "Date of Sale",
            value: value.to_string(),
        })
}
