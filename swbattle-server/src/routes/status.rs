//! Health check with a summary of what the server holds

use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use swbattle_core::Category;

use crate::error::ApiError;
use crate::state::ServerState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Category of the battle currently on the table
    pub category: Category,
    /// Row count per catalog resource
    pub resources: BTreeMap<&'static str, usize>,
}

pub async fn status_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let resources = state.read_catalog()?.counts().into_iter().collect();
    let category = state.battle_view()?.category;

    Ok(Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        category,
        resources,
    }))
}
