// WeSplit - REST API
// JSON surface over the calculator, served by bin/server.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};

use crate::calculator::{BillInputs, DerivedTotals};
use crate::config::Settings;
use crate::display::TotalsView;
use crate::tips::TipSelection;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TipOption {
    pub index: usize,
    pub percentage: u32,
}

/// Raw form values; absent fields are empty text
#[derive(Debug, Default, Deserialize)]
pub struct SplitQuery {
    #[serde(default)]
    pub check_amount: String,
    #[serde(default)]
    pub people: String,
    pub tip: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SplitResponse {
    pub check_amount: f64,
    pub people_count: f64,
    pub tip_percentage: u32,
    pub totals: DerivedTotals,
    pub formatted: FormattedTotals,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormattedTotals {
    pub tip: String,
    pub grand_total: String,
    pub per_person: String,
}

impl From<TotalsView> for FormattedTotals {
    fn from(view: TotalsView) -> Self {
        Self {
            tip: view.tip,
            grand_total: view.grand_total,
            per_person: view.per_person,
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/tips - The tip table in picker order
async fn get_tips() -> impl IntoResponse {
    let tips: Vec<TipOption> = TipSelection::all()
        .map(|tip| TipOption {
            index: tip.index(),
            percentage: tip.percentage(),
        })
        .collect();

    Json(ApiResponse::ok(tips))
}

/// GET /api/split - Compute totals from raw form values
async fn get_split(
    State(state): State<AppState>,
    Query(query): Query<SplitQuery>,
) -> impl IntoResponse {
    let tip = match query.tip {
        None => state.settings.default_tip(),
        Some(raw) => match raw.parse::<TipSelection>() {
            Ok(tip) => tip,
            Err(e) => {
                warn!(tip = %raw, "rejected split request: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<SplitResponse>::err(e.to_string())),
                )
                    .into_response();
            }
        },
    };

    let inputs = BillInputs::parse(&query.check_amount, &query.people, tip);
    let totals = inputs.totals();
    debug!(?inputs, ?totals, "split computed");

    let response = SplitResponse {
        check_amount: inputs.check_amount,
        people_count: inputs.people_count,
        tip_percentage: tip.percentage(),
        totals,
        formatted: TotalsView::new(&totals, &state.settings.currency_symbol).into(),
    };

    (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
}

// ============================================================================
// Router
// ============================================================================

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/tips", get(get_tips))
        .route("/split", get(get_split))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use tower::util::ServiceExt; // for `oneshot`

    fn setup_test_app() -> Router {
        router(AppState::new(Settings::default()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(uri: &str) -> (StatusCode, ApiResponse<T>) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = setup_test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json::<String>("/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(body.data.as_deref(), Some("OK"));
    }

    #[tokio::test]
    async fn test_tips_listed_in_order() {
        let (status, body) = get_json::<Vec<TipOption>>("/api/tips").await;

        assert_eq!(status, StatusCode::OK);
        let percentages: Vec<u32> = body.data.unwrap().iter().map(|t| t.percentage).collect();
        assert_eq!(percentages, vec![10, 15, 20, 25, 0]);
    }

    #[tokio::test]
    async fn test_split() {
        let (status, body) =
            get_json::<SplitResponse>("/api/split?check_amount=100&people=4&tip=2").await;

        assert_eq!(status, StatusCode::OK);
        let split = body.data.unwrap();
        assert_eq!(split.totals.tip_amount, 20.0);
        assert_eq!(split.totals.grand_total, 120.0);
        assert_eq!(split.totals.per_person_amount, 30.0);
        assert_eq!(split.formatted.per_person, "$30.00");
    }

    #[tokio::test]
    async fn test_split_defaults_for_missing_fields() {
        let (status, body) = get_json::<SplitResponse>("/api/split").await;

        assert_eq!(status, StatusCode::OK);
        let split = body.data.unwrap();
        assert_eq!(split.check_amount, 0.0);
        assert_eq!(split.people_count, 1.0);
        assert_eq!(split.tip_percentage, 20);
        assert_eq!(split.totals, DerivedTotals::default());
    }

    #[tokio::test]
    async fn test_split_zero_people_clamped() {
        let (_, body) = get_json::<SplitResponse>("/api/split?check_amount=100&people=0&tip=1").await;

        let split = body.data.unwrap();
        assert_eq!(split.people_count, 1.0);
        assert_eq!(split.formatted.per_person, "$115.00");
    }

    #[tokio::test]
    async fn test_split_rejects_bad_tip_index() {
        let (status, body) = get_json::<SplitResponse>("/api/split?check_amount=10&tip=9").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert!(body.data.is_none());
        assert!(body.error.unwrap().contains("out of range"));
    }

    #[tokio::test]
    async fn test_split_rejects_non_numeric_tip() {
        for uri in [
            "/api/split?check_amount=10&tip=abc",
            "/api/split?check_amount=10&tip=-1",
            "/api/split?check_amount=10&tip=",
        ] {
            let (status, body) = get_json::<SplitResponse>(uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(!body.success);
            assert!(body.data.is_none());
            assert!(body.error.unwrap().contains("not a number"));
        }
    }
}
