use api_types::{balances::Balances, ledger::LedgerEntry};
use axum::{Json, extract::State};
use uuid::Uuid;

use crate::{ServerError, extract::PathParams, server::ServerState, views};

pub async fn list(
    State(state): State<ServerState>,
    PathParams(space_id): PathParams<Uuid>,
) -> Result<Json<Vec<LedgerEntry>>, ServerError> {
    let items = state.engine.ledger(space_id).await?;
    Ok(Json(items.iter().map(views::ledger_entry).collect()))
}

pub async fn balances(
    State(state): State<ServerState>,
    PathParams(space_id): PathParams<Uuid>,
) -> Result<Json<Balances>, ServerError> {
    let overview = state.engine.space_balances(space_id).await?;
    tracing::debug!(
        "balances for space {space_id}: {} member(s)",
        overview.balances.members.len()
    );
    Ok(Json(views::balances(overview)))
}
