use axum::{routing::get, Router};

use self::player::get_player;

pub mod player;

pub fn router() -> Router {
    Router::new().route("/player/:rsn", get(get_player))
}
