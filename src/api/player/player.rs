use std::sync::Arc;

use axum::{extract::Path, Extension};
use axum_macros::debug_handler;

use crate::{
    api::response::{classify, HiscoresResponse},
    context::Context,
    hiscores::Player,
    utils::http_utils::DEFAULT_MODE,
};

#[debug_handler]
pub async fn get_player(
    Extension(ctx): Extension<Arc<Context>>,
    Path(rsn): Path<String>,
) -> HiscoresResponse<Player> {
    let result = ctx.hiscores.player(&rsn, DEFAULT_MODE).await;

    classify(format!("player {}", rsn), result)
}
