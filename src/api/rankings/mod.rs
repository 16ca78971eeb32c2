use axum::{routing::get, Router};

use self::rankings::{get_activity_page, get_skill_page};

pub mod rankings;

/// Both parameters are kept as raw strings so that bad values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingsRequestQuery {
    pub mode: Option<String>,
    pub page: Option<String>,
}

impl RankingsRequestQuery {
    /// Builds the query from raw key/value pairs. When a key is repeated the first value
    /// wins, unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = RankingsRequestQuery::default();

        for (key, value) in pairs {
            match key.as_str() {
                "mode" if query.mode.is_none() => query.mode = Some(value),
                "page" if query.page.is_none() => query.page = Some(value),
                _ => {}
            }
        }

        query
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/skill/:skill", get(get_skill_page))
        .route("/skill/:skill/", get(get_skill_page))
        .route("/activity/:activity", get(get_activity_page))
}
