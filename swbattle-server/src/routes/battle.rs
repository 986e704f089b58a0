//! Battle API endpoints
//!
//! The session lives on the server, so scores persist across requests for
//! the lifetime of the process.

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use swbattle_core::Category;

use crate::error::ApiError;
use crate::state::{BattleView, ServerState};

/// Current battle table and scores
pub async fn get_battle(State(state): State<Arc<ServerState>>) -> Result<Json<BattleView>, ApiError> {
    Ok(Json(state.battle_view()?))
}

/// Play again in the active category
pub async fn play_battle(State(state): State<Arc<ServerState>>) -> Result<Json<BattleView>, ApiError> {
    Ok(Json(state.play()?))
}

#[derive(Deserialize)]
pub struct CategoryRequest {
    pub category: Category,
}

/// Switch battle category and play a round in it
pub async fn switch_category(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<BattleView>, ApiError> {
    Ok(Json(state.switch_category(req.category)?))
}
