use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::aggregate::{Aggregator, Snapshot};
use crate::export::{export_filename, ExportFormat};
use crate::filter::{SignalDigest, SignalFilter};
use crate::signal::SignalRecord;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

#[derive(Clone)]
pub struct AppState {
    aggregator: Arc<Aggregator>,
    snapshot: Arc<RwLock<Snapshot>>,
}

impl AppState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            snapshot: Arc::new(RwLock::new(Snapshot::empty())),
        }
    }

    /// Run one pass and replace the served snapshot.
    pub async fn refresh(&self, lookback_days: u32) -> RefreshResp {
        let fresh = self.aggregator.snapshot(lookback_days).await;
        let resp = RefreshResp {
            total: fresh.records.len(),
            generated_at: fresh.generated_at,
            lookback_days,
        };
        *self.snapshot.write().await = fresh;
        resp
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/refresh", post(refresh))
        .route("/signals", get(list_signals))
        .route("/signals/digest", get(digest))
        .route("/export", get(export))
        .route("/article", post(scrape_article))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct RefreshQuery {
    days: Option<u32>,
}

#[derive(Debug, serde::Serialize)]
pub struct RefreshResp {
    pub total: usize,
    pub generated_at: Option<DateTime<Utc>>,
    pub lookback_days: u32,
}

async fn refresh(State(state): State<AppState>, Query(q): Query<RefreshQuery>) -> Json<RefreshResp> {
    let days = q.days.unwrap_or(DEFAULT_LOOKBACK_DAYS);
    Json(state.refresh(days).await)
}

async fn list_signals(
    State(state): State<AppState>,
    Query(filter): Query<SignalFilter>,
) -> Json<Vec<SignalRecord>> {
    let snap = state.snapshot.read().await;
    Json(filter.apply(&snap.records).into_iter().cloned().collect())
}

#[derive(serde::Serialize)]
struct DigestResp {
    snapshot_total: usize,
    generated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    digest: SignalDigest,
}

async fn digest(
    State(state): State<AppState>,
    Query(filter): Query<SignalFilter>,
) -> Json<DigestResp> {
    let snap = state.snapshot.read().await;
    Json(DigestResp {
        snapshot_total: snap.records.len(),
        generated_at: snap.generated_at,
        digest: SignalDigest::from_records(filter.apply(&snap.records)),
    })
}

#[derive(serde::Deserialize)]
struct ExportQuery {
    format: Option<ExportFormat>,
}

async fn export(
    State(state): State<AppState>,
    Query(q): Query<ExportQuery>,
    Query(filter): Query<SignalFilter>,
) -> Response {
    let format = q.format.unwrap_or_default();
    let snap = state.snapshot.read().await;
    match format.render(filter.apply(&snap.records)) {
        Ok(body) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                export_filename(format, Utc::now())
            );
            (
                [
                    (header::CONTENT_TYPE, format.mime().to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "export failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("export failed: {e}")).into_response()
        }
    }
}

#[derive(serde::Deserialize)]
struct ArticleReq {
    url: String,
}

async fn scrape_article(State(state): State<AppState>, Json(body): Json<ArticleReq>) -> Response {
    let url = body.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return (StatusCode::BAD_REQUEST, "url must be http(s)").into_response();
    }
    Json(state.aggregator.scrape_article(url).await).into_response()
}
