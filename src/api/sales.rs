//! Report handlers for the `/sales` routes.
//!
//! Each handler validates the date range and delegates to one aggregation
//! operation; the summary structs serialize directly as the response bodies.

use crate::api::AppState;
use crate::core::customers::{self, CustomerSummary};
use crate::core::quantity::{self, QuantitySummary};
use crate::core::revenue::{self, RevenueSummary};
use crate::core::segmentation::{self, SegmentationSummary};
use crate::core::DateRange;
use crate::errors::Error;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

/// Raw date-range query parameters; every report requires both.
#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    /// First day of the report, `YYYY-MM-DD`
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    /// Last day of the report, `YYYY-MM-DD`
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

impl DateRangeParams {
    fn range(&self) -> Result<DateRange, Error> {
        DateRange::from_params(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

/// `GET /sales/revenue_calculation`
pub async fn revenue_calculation(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<RevenueSummary>, Error> {
    let range = params.range()?;
    Ok(Json(revenue::revenue_summary(&state.db, &range).await?))
}

/// `GET /sales/top_prodcuts`
pub async fn top_products(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<QuantitySummary>, Error> {
    let range = params.range()?;
    Ok(Json(quantity::quantity_summary(&state.db, &range).await?))
}

/// `GET /sales/customer_analizies`
pub async fn customer_analysis(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<CustomerSummary>, Error> {
    let range = params.range()?;
    Ok(Json(customers::customer_summary(&state.db, &range).await?))
}

/// `GET /sales/other_calculation`
pub async fn other_calculation(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<SegmentationSummary>, Error> {
    let range = params.range()?;
    Ok(Json(
        segmentation::segmentation_summary(&state.db, &range).await?,
    ))
}
