//! HTTP interface - routes, shared state, and error mapping.
//!
//! Thin adapters over the aggregation engine: each handler parses the two
//! date query parameters, runs the corresponding engine operation, and
//! serializes its summary struct. Route paths are kept byte-for-byte from the
//! service this replaces (misspellings included) so existing dashboards keep
//! working.

/// The four `/sales/*` report handlers
pub mod sales;

use crate::errors::{Error, Result};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Pooled store connection used by every report query
    pub db: DatabaseConnection,
}

/// Builds the application router with request tracing and permissive CORS.
#[must_use]
pub fn router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/sales/revenue_calculation", get(sales::revenue_calculation))
        .route("/sales/top_prodcuts", get(sales::top_products))
        .route("/sales/customer_analizies", get(sales::customer_analysis))
        .route("/sales/other_calculation", get(sales::other_calculation))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { db })
}

/// Binds the listener and serves requests until the process exits.
///
/// # Errors
/// Returns an error if the port cannot be bound or the server fails.
pub async fn serve(db: DatabaseConnection, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("server running on port: {port}");

    axum::serve(listener, router(db)).await?;
    Ok(())
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::MissingDateRange | Error::InvalidDate { .. } => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            // Everything else is an internal failure; log the detail and
            // return an opaque body.
            other => {
                error!("report request failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
