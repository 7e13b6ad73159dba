//! The aggregation engine.
//!
//! Every reporting operation works the same way: validate a date range, scan
//! the matching order lines once (joined with the product and customer
//! dimensions, in `order_id` order), then fold the lines into the requested
//! aggregates. Folding happens in Rust over [`Decimal`] values, which keeps
//! monetary sums exact, and in scan order, which makes grouped output
//! deterministic: groups sorted by their aggregate break ties by first
//! appearance.

/// Customer activity metrics: distinct buyers, order count, average order value
pub mod customers;
/// Units-sold totals grouped by category and region
pub mod quantity;
/// Revenue totals, grouped breakdowns, and the monthly trend
pub mod revenue;
/// Profit per product, customer lifetime value, and spend segmentation
pub mod segmentation;

use crate::entities::{customer, order, product, Order};
use crate::errors::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeUtc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::AddAssign;

/// An inclusive calendar-date range over `date_of_sale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day included in the range
    pub start: NaiveDate,
    /// Last day included in the range
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds the range from raw query parameters.
    ///
    /// Both bounds are required; blank strings count as missing, matching the
    /// API contract this service replaces.
    ///
    /// # Errors
    /// * [`Error::MissingDateRange`] when either bound is absent or blank
    /// * [`Error::InvalidDate`] when a bound is not a `YYYY-MM-DD` date
    pub fn from_params(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let start = start.map(str::trim).filter(|s| !s.is_empty());
        let end = end.map(str::trim).filter(|s| !s.is_empty());

        match (start, end) {
            (Some(start), Some(end)) => Ok(Self {
                start: parse_date(start)?,
                end: parse_date(end)?,
            }),
            _ => Err(Error::MissingDateRange),
        }
    }

    /// Inclusive lower bound: midnight at the start of the first day.
    pub(crate) fn start_at(&self) -> DateTimeUtc {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Exclusive upper bound: midnight after the end date, so the whole end
    /// day is included.
    pub(crate) fn end_before(&self) -> DateTimeUtc {
        self.end
            .succ_opt()
            .unwrap_or(NaiveDate::MAX)
            .and_time(NaiveTime::MIN)
            .and_utc()
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// One order row joined with the dimension attributes the aggregations need.
///
/// Typed projection of the engine's single range scan.
#[derive(Debug, Clone, FromQueryResult)]
pub struct OrderLine {
    /// Order primary key; the scan is ordered by this column
    pub order_id: i64,
    /// Customer natural key
    pub customer_id: String,
    /// Joined from the customers table
    pub customer_name: String,
    /// Product natural key
    pub product_id: String,
    /// Joined from the products table
    pub product_name: String,
    /// Joined from the products table
    pub category: String,
    /// Sales region of the order
    pub region: String,
    /// When the sale happened
    pub date_of_sale: DateTimeUtc,
    /// Units sold
    pub quantity_sold: i32,
    /// Price per unit before discount
    pub unit_price: Decimal,
    /// Fractional discount in `[0, 1]`
    pub discount: Decimal,
    /// Shipping cost charged against profit
    pub shipping_cost: Decimal,
}

impl OrderLine {
    /// `unit_price × quantity`, discount ignored.
    #[must_use]
    pub fn gross_revenue(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity_sold)
    }

    /// `unit_price × quantity × (1 − discount)`.
    #[must_use]
    pub fn net_revenue(&self) -> Decimal {
        self.gross_revenue() * (Decimal::ONE - self.discount)
    }

    /// Net revenue minus shipping cost.
    #[must_use]
    pub fn profit(&self) -> Decimal {
        self.net_revenue() - self.shipping_cost
    }

    /// Calendar-month bucket key, e.g. `"2024-03"`. Sorts chronologically.
    #[must_use]
    pub fn month(&self) -> String {
        self.date_of_sale.format("%Y-%m").to_string()
    }
}

/// Scans the orders in `range`, joined with their product and customer rows.
///
/// Ordered by `order_id` so the aggregations see lines in load order; that
/// order is what breaks ties between equal group totals downstream.
pub(crate) async fn fetch_order_lines(
    db: &DatabaseConnection,
    range: &DateRange,
) -> Result<Vec<OrderLine>> {
    Order::find()
        .select_only()
        .columns([
            order::Column::OrderId,
            order::Column::CustomerId,
            order::Column::ProductId,
            order::Column::Region,
            order::Column::DateOfSale,
            order::Column::QuantitySold,
            order::Column::UnitPrice,
            order::Column::Discount,
            order::Column::ShippingCost,
        ])
        .column_as(product::Column::Name, "product_name")
        .column_as(product::Column::Category, "category")
        .column_as(customer::Column::Name, "customer_name")
        .join(JoinType::InnerJoin, order::Relation::Product.def())
        .join(JoinType::InnerJoin, order::Relation::Customer.def())
        .filter(order::Column::DateOfSale.gte(range.start_at()))
        .filter(order::Column::DateOfSale.lt(range.end_before()))
        .order_by_asc(order::Column::OrderId)
        .into_model::<OrderLine>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Accumulates per-group totals while remembering the order in which each
/// group first appeared in the scan.
pub(crate) struct GroupTotals<K, V> {
    keys: Vec<K>,
    totals: HashMap<K, V>,
}

impl<K, V> GroupTotals<K, V>
where
    K: Eq + Hash + Clone,
    V: Copy + AddAssign,
{
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            totals: HashMap::new(),
        }
    }

    pub fn add(&mut self, key: K, amount: V) {
        match self.totals.entry(key) {
            Entry::Occupied(mut entry) => *entry.get_mut() += amount,
            Entry::Vacant(entry) => {
                self.keys.push(entry.key().clone());
                entry.insert(amount);
            }
        }
    }

    /// Groups in first-appearance order.
    fn into_rows(self) -> Vec<(K, V)> {
        let Self { keys, mut totals } = self;
        keys.into_iter()
            .filter_map(|key| totals.remove(&key).map(|total| (key, total)))
            .collect()
    }

    /// Groups sorted descending by total. The sort is stable, so equal
    /// totals keep first-appearance order.
    pub fn into_desc(self) -> Vec<(K, V)>
    where
        V: Ord,
    {
        let mut rows = self.into_rows();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }

    /// Groups sorted ascending by key; used for the monthly trend.
    pub fn into_key_asc(self) -> Vec<(K, V)>
    where
        K: Ord,
    {
        let mut rows = self.into_rows();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{insert_customer, insert_order, insert_product, setup_test_db};

    #[test]
    fn test_from_params_requires_both_bounds() {
        assert!(matches!(
            DateRange::from_params(None, None),
            Err(Error::MissingDateRange)
        ));
        assert!(matches!(
            DateRange::from_params(Some("2024-01-01"), None),
            Err(Error::MissingDateRange)
        ));
        assert!(matches!(
            DateRange::from_params(None, Some("2024-01-31")),
            Err(Error::MissingDateRange)
        ));
    }

    #[test]
    fn test_from_params_treats_blank_as_missing() {
        assert!(matches!(
            DateRange::from_params(Some(""), Some("2024-01-31")),
            Err(Error::MissingDateRange)
        ));
        assert!(matches!(
            DateRange::from_params(Some("2024-01-01"), Some("   ")),
            Err(Error::MissingDateRange)
        ));
    }

    #[test]
    fn test_from_params_rejects_malformed_dates() {
        assert!(matches!(
            DateRange::from_params(Some("01/02/2024"), Some("2024-01-31")),
            Err(Error::InvalidDate { .. })
        ));
        assert!(matches!(
            DateRange::from_params(Some("2024-01-01"), Some("soon")),
            Err(Error::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_from_params_parses_valid_range() {
        let range = DateRange::from_params(Some("2024-01-01"), Some("2024-03-31")).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_range_covers_whole_end_day() {
        let range = DateRange::from_params(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        let last_moment = "2024-01-31T23:59:59Z".parse::<DateTimeUtc>().unwrap();
        assert!(last_moment >= range.start_at());
        assert!(last_moment < range.end_before());

        let next_day = "2024-02-01T00:00:00Z".parse::<DateTimeUtc>().unwrap();
        assert!(next_day >= range.end_before());
    }

    #[test]
    fn test_group_totals_sorts_descending() {
        let mut totals = GroupTotals::new();
        totals.add("a", 1_i64);
        totals.add("b", 5);
        totals.add("a", 2);

        assert_eq!(totals.into_desc(), vec![("b", 5), ("a", 3)]);
    }

    #[test]
    fn test_group_totals_ties_keep_first_appearance_order() {
        let mut totals = GroupTotals::new();
        totals.add("late", 7_i64);
        totals.add("early", 7);
        totals.add("big", 9);

        assert_eq!(
            totals.into_desc(),
            vec![("big", 9), ("late", 7), ("early", 7)]
        );
    }

    #[test]
    fn test_group_totals_key_ascending() {
        let mut totals = GroupTotals::new();
        totals.add("2024-02", 1_i64);
        totals.add("2023-12", 1);
        totals.add("2024-01", 1);

        let months: Vec<&str> = totals.into_key_asc().into_iter().map(|r| r.0).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
    }

    #[tokio::test]
    async fn test_fetch_order_lines_joins_and_filters() -> Result<()> {
        let db = setup_test_db().await?;
        insert_customer(&db, "C1", "Ada").await?;
        insert_product(&db, "P1", "Widget", "Gadgets").await?;

        // One order inside the range, on the end day itself, and one after it.
        insert_order(
            &db,
            1,
            "P1",
            "C1",
            "North",
            "2024-01-31 18:45:00",
            2,
            "10.00",
            "0.10",
            "1.50",
        )
        .await?;
        insert_order(
            &db, 2, "P1", "C1", "North", "2024-02-01", 1, "9.99", "0.00", "0.50",
        )
        .await?;

        let range = DateRange::from_params(Some("2024-01-01"), Some("2024-01-31"))?;
        let lines = fetch_order_lines(&db, &range).await?;

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.order_id, 1);
        assert_eq!(line.customer_name, "Ada");
        assert_eq!(line.product_name, "Widget");
        assert_eq!(line.category, "Gadgets");
        assert_eq!(line.quantity_sold, 2);
        assert_eq!(line.unit_price, "10.00".parse::<Decimal>().unwrap());

        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_order_lines_scan_is_ordered_by_order_id() -> Result<()> {
        let db = setup_test_db().await?;
        insert_customer(&db, "C1", "Ada").await?;
        insert_product(&db, "P1", "Widget", "Gadgets").await?;

        insert_order(
            &db, 42, "P1", "C1", "North", "2024-01-05", 1, "1.00", "0.00", "0.00",
        )
        .await?;
        insert_order(
            &db, 7, "P1", "C1", "South", "2024-01-20", 1, "1.00", "0.00", "0.00",
        )
        .await?;

        let range = DateRange::from_params(Some("2024-01-01"), Some("2024-01-31"))?;
        let ids: Vec<i64> = fetch_order_lines(&db, &range)
            .await?
            .into_iter()
            .map(|line| line.order_id)
            .collect();

        assert_eq!(ids, vec![7, 42]);
        Ok(())
    }
}
