use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::hiscores::{HiscoresError, Player, RankingRow};

pub const SERVICE_UNAVAILABLE: &str = "Service Unavailable";

/// Body of every non-200 response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
}

/// Upstream results that can come back well-formed but without usable data.
pub trait Completeness {
    fn is_complete(&self) -> bool;
}

impl Completeness for Player {
    fn is_complete(&self) -> bool {
        Player::is_complete(self)
    }
}

impl Completeness for Vec<RankingRow> {
    fn is_complete(&self) -> bool {
        !self.is_empty()
    }
}

/// The outcome of a single hiscores lookup as seen by a client.
#[derive(Debug)]
pub enum HiscoresResponse<T> {
    /// 200, the upstream data as-is.
    Found(T),
    /// 503, the upstream answered but the data is missing or empty.
    Degraded,
    /// 500, the upstream call itself failed.
    Failed(HiscoresError),
}

impl<T> HiscoresResponse<T> {
    pub fn status(&self) -> StatusCode {
        match self {
            HiscoresResponse::Found(_) => StatusCode::OK,
            HiscoresResponse::Degraded => StatusCode::SERVICE_UNAVAILABLE,
            HiscoresResponse::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Decides how an upstream result is reported. `lookup` only names the request in logs.
pub fn classify<T: Completeness>(
    lookup: impl Display,
    result: Result<T, HiscoresError>,
) -> HiscoresResponse<T> {
    match result {
        Ok(data) if data.is_complete() => HiscoresResponse::Found(data),
        Ok(_) => {
            warn!(%lookup, "Hiscores returned no usable data");
            HiscoresResponse::Degraded
        }
        Err(e) => {
            error!(%lookup, kind = e.kind(), "Hiscores lookup failed: {}", e);
            HiscoresResponse::Failed(e)
        }
    }
}

impl<T: Serialize> IntoResponse for HiscoresResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            HiscoresResponse::Found(data) => (status, Json(data)).into_response(),
            HiscoresResponse::Degraded => (
                status,
                Json(ErrorResponse {
                    status: status.as_u16(),
                    error: SERVICE_UNAVAILABLE.to_string(),
                }),
            )
                .into_response(),
            HiscoresResponse::Failed(e) => (
                status,
                Json(ErrorResponse {
                    status: status.as_u16(),
                    error: e.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
