//! Revenue reporting: the gross total, net-revenue breakdowns by product,
//! category, and region, and the monthly trend.
//!
//! The scalar total deliberately ignores the discount column while every
//! grouped breakdown applies it. The reporting API this service replaces
//! shipped with that inconsistency and downstream consumers reconcile against
//! both numbers, so both computations are kept as-is.

use crate::core::{fetch_order_lines, DateRange, GroupTotals, OrderLine};
use crate::errors::Result;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Net revenue for one product across the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRevenue {
    /// Product display name
    pub product_name: String,
    /// `Σ unit_price × quantity × (1 − discount)` for the product
    pub revenue: Decimal,
}

/// Net revenue for one product category across the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    /// Catalog category
    pub category: String,
    /// Net revenue for the category
    pub revenue: Decimal,
}

/// Net revenue for one sales region across the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRevenue {
    /// Sales region
    pub region: String,
    /// Net revenue for the region
    pub revenue: Decimal,
}

/// Net revenue for one calendar month of the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    /// `YYYY-MM` bucket key
    pub month: String,
    /// Net revenue for the month
    pub revenue: Decimal,
}

/// Response shape for `GET /sales/revenue_calculation`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    /// Gross total: `Σ unit_price × quantity`, discount ignored
    pub total_revenue: Decimal,
    /// Net revenue per product, descending
    pub product_revenue: Vec<ProductRevenue>,
    /// Net revenue per category, descending
    pub category_revenue: Vec<CategoryRevenue>,
    /// Net revenue per region, descending
    pub region_revenue: Vec<RegionRevenue>,
    /// Net revenue per calendar month, chronological
    pub revenue_trend: Vec<MonthlyRevenue>,
}

/// Computes the full revenue summary for `range`.
///
/// # Errors
/// Returns an error if the range scan fails.
pub async fn revenue_summary(
    db: &DatabaseConnection,
    range: &DateRange,
) -> Result<RevenueSummary> {
    let lines = fetch_order_lines(db, range).await?;
    Ok(summarize(&lines))
}

/// Folds scanned lines into the revenue summary.
fn summarize(lines: &[OrderLine]) -> RevenueSummary {
    let mut total_revenue = Decimal::ZERO;
    let mut by_product = GroupTotals::new();
    let mut by_category = GroupTotals::new();
    let mut by_region = GroupTotals::new();
    let mut by_month = GroupTotals::new();

    for line in lines {
        total_revenue += line.gross_revenue();

        let net = line.net_revenue();
        by_product.add((line.product_id.clone(), line.product_name.clone()), net);
        by_category.add(line.category.clone(), net);
        by_region.add(line.region.clone(), net);
        by_month.add(line.month(), net);
    }

    RevenueSummary {
        total_revenue,
        product_revenue: by_product
            .into_desc()
            .into_iter()
            .map(|((_, product_name), revenue)| ProductRevenue {
                product_name,
                revenue,
            })
            .collect(),
        category_revenue: by_category
            .into_desc()
            .into_iter()
            .map(|(category, revenue)| CategoryRevenue { category, revenue })
            .collect(),
        region_revenue: by_region
            .into_desc()
            .into_iter()
            .map(|(region, revenue)| RegionRevenue { region, revenue })
            .collect(),
        revenue_trend: by_month
            .into_key_asc()
            .into_iter()
            .map(|(month, revenue)| MonthlyRevenue { month, revenue })
            .collect(),
    }
}
