//! Customer activity metrics over the range.

use crate::core::{fetch_order_lines, DateRange, OrderLine};
use crate::errors::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::HashSet;

/// Response shape for `GET /sales/customer_analizies`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    /// Distinct customers with at least one order in the range
    pub total_customers: usize,
    /// Orders placed in the range
    pub total_orders: usize,
    /// Mean net revenue per order; `0.0` when no orders match
    pub average_order_value: f64,
}

/// Computes the customer activity summary for `range`.
///
/// # Errors
/// Returns an error if the range scan fails.
pub async fn customer_summary(
    db: &DatabaseConnection,
    range: &DateRange,
) -> Result<CustomerSummary> {
    let lines = fetch_order_lines(db, range).await?;
    Ok(summarize(&lines))
}

fn summarize(lines: &[OrderLine]) -> CustomerSummary {
    let distinct: HashSet<&str> = lines.iter().map(|line| line.customer_id.as_str()).collect();

    // The mean is computed in decimal and only converted to a float at the
    // edge, which is the one metric the wire contract types as a number.
    let average_order_value = if lines.is_empty() {
        0.0
    } else {
        let net_total: Decimal = lines.iter().map(OrderLine::net_revenue).sum();
        (net_total / Decimal::from(lines.len()))
            .to_f64()
            .unwrap_or(0.0)
    };

    CustomerSummary {
        total_customers: distinct.len(),
        total_orders: lines.len(),
        average_order_value,
    }
}
