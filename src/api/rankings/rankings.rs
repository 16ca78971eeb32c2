use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    Extension,
};
use axum_macros::debug_handler;

use crate::{
    api::response::{classify, HiscoresResponse},
    context::Context,
    hiscores::RankingRow,
    utils::http_utils::{parse_mode, parse_page},
};

use super::RankingsRequestQuery;

#[debug_handler]
pub async fn get_skill_page(
    Extension(ctx): Extension<Arc<Context>>,
    Path(skill): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> HiscoresResponse<Vec<RankingRow>> {
    let query = RankingsRequestQuery::from_pairs(pairs);
    let mode = parse_mode(query.mode.as_deref());
    let page = parse_page(query.page.as_deref());

    let result = ctx.hiscores.skill_page(&skill, &mode, page).await;

    classify(
        format!("skill {} ({}, page {})", skill, mode, page),
        result,
    )
}

#[debug_handler]
pub async fn get_activity_page(
    Extension(ctx): Extension<Arc<Context>>,
    Path(activity): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> HiscoresResponse<Vec<RankingRow>> {
    let query = RankingsRequestQuery::from_pairs(pairs);
    let mode = parse_mode(query.mode.as_deref());
    let page = parse_page(query.page.as_deref());

    let result = ctx.hiscores.activity_page(&activity, &mode, page).await;

    classify(
        format!("activity {} ({}, page {})", activity, mode, page),
        result,
    )
}
