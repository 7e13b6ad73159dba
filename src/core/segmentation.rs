//! Profit and customer-value reporting: per-product profit, customer
//! lifetime value, and spend segmentation.

use crate::core::{fetch_order_lines, DateRange, GroupTotals, OrderLine};
use crate::errors::Result;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Profit earned on one product across the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductProfit {
    /// Product display name
    pub product_name: String,
    /// `Σ (net revenue − shipping cost)` for the product
    pub profit: Decimal,
}

/// Total net revenue attributed to one customer across the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerValue {
    /// Customer natural key
    pub customer_id: String,
    /// Customer display name
    pub customer_name: String,
    /// `Σ net revenue` for the customer
    pub lifetime_value: Decimal,
}

/// One customer's spend in the range plus their derived segment label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSegment {
    /// Customer natural key
    pub customer_id: String,
    /// Customer display name
    pub customer_name: String,
    /// `Σ net revenue` for the customer
    pub total_spent: Decimal,
    /// `"High Value"`, `"Mid Value"`, or `"Low Value"`
    pub segment: &'static str,
}

/// Response shape for `GET /sales/other_calculation`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationSummary {
    /// Profit per product, descending
    pub profit_by_product: Vec<ProductProfit>,
    /// Net revenue per customer, descending
    pub customer_lifetime_value: Vec<CustomerValue>,
    /// Spend and segment label per customer, descending by spend
    pub customer_segmentation: Vec<CustomerSegment>,
}

/// Spend label for a customer's total net revenue in the range.
///
/// Boundaries are half-open: exactly 1000 is `"High Value"` and exactly 500
/// is `"Mid Value"`, so 999.99 still lands in the middle band.
#[must_use]
pub fn segment_label(total_spent: Decimal) -> &'static str {
    if total_spent >= Decimal::ONE_THOUSAND {
        "High Value"
    } else if total_spent >= Decimal::from(500) {
        "Mid Value"
    } else {
        "Low Value"
    }
}

/// Computes the profit and segmentation summary for `range`.
///
/// # Errors
/// Returns an error if the range scan fails.
pub async fn segmentation_summary(
    db: &DatabaseConnection,
    range: &DateRange,
) -> Result<SegmentationSummary> {
    let lines = fetch_order_lines(db, range).await?;
    Ok(summarize(&lines))
}

fn summarize(lines: &[OrderLine]) -> SegmentationSummary {
    let mut profit_by_product = GroupTotals::new();
    let mut spend_by_customer = GroupTotals::new();

    for line in lines {
        profit_by_product.add(
            (line.product_id.clone(), line.product_name.clone()),
            line.profit(),
        );
        spend_by_customer.add(
            (line.customer_id.clone(), line.customer_name.clone()),
            line.net_revenue(),
        );
    }

    let spend_rows = spend_by_customer.into_desc();

    SegmentationSummary {
        profit_by_product: profit_by_product
            .into_desc()
            .into_iter()
            .map(|((_, product_name), profit)| ProductProfit {
                product_name,
                profit,
            })
            .collect(),
        customer_lifetime_value: spend_rows
            .iter()
            .cloned()
            .map(|((customer_id, customer_name), lifetime_value)| CustomerValue {
                customer_id,
                customer_name,
                lifetime_value,
            })
            .collect(),
        customer_segmentation: spend_rows
            .into_iter()
            .map(|((customer_id, customer_name), total_spent)| CustomerSegment {
                customer_id,
                customer_name,
                segment: segment_label(total_spent),
                total_spent,
            })
            .collect(),
    }
}
