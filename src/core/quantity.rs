//! Units-sold reporting grouped by category and region.

use crate::core::{fetch_order_lines, DateRange, GroupTotals, OrderLine};
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Units sold in one product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryQuantity {
    /// Catalog category
    pub category: String,
    /// Units sold in the category
    pub quantity_sold: i64,
}

/// Units sold in one sales region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionQuantity {
    /// Sales region
    pub region: String,
    /// Units sold in the region
    pub quantity_sold: i64,
}

/// Response shape for `GET /sales/top_prodcuts`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitySummary {
    /// Total units sold in the range
    pub total_quantity_sold: i64,
    /// Units per category, descending
    pub quantity_by_category: Vec<CategoryQuantity>,
    /// Units per region, descending
    pub quantity_by_region: Vec<RegionQuantity>,
}

/// Computes the quantity summary for `range`.
///
/// # Errors
/// Returns an error if the range scan fails.
pub async fn quantity_summary(
    db: &DatabaseConnection,
    range: &DateRange,
) -> Result<QuantitySummary> {
    let lines = fetch_order_lines(db, range).await?;
    Ok(summarize(&lines))
}

fn summarize(lines: &[OrderLine]) -> QuantitySummary {
    let mut total_quantity_sold = 0_i64;
    let mut by_category = GroupTotals::new();
    let mut by_region = GroupTotals::new();

    for line in lines {
        let quantity = i64::from(line.quantity_sold);
        total_quantity_sold += quantity;
        by_category.add(line.category.clone(), quantity);
        by_region.add(line.region.clone(), quantity);
    }

    QuantitySummary {
        total_quantity_sold,
        quantity_by_category: by_category
            .into_desc()
            .into_iter()
            .map(|(category, quantity_sold)| CategoryQuantity {
                category,
                quantity_sold,
            })
            .collect(),
        quantity_by_region: by_region
            .into_desc()
            .into_iter()
            .map(|(region, quantity_sold)| RegionQuantity {
                region,
                quantity_sold,
            })
            .collect(),
    }
}
