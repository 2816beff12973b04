//! Refills API endpoints.

use api_types::{
    Created,
    refill::{RefillNew, RefillView},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::RefillInput;
use uuid::Uuid;

use crate::{
    ServerError,
    extract::{JsonBody, PathParams},
    server::ServerState,
    views,
};

fn refill_input(payload: RefillNew) -> RefillInput {
    RefillInput {
        date: payload.date,
        cost: payload.cost,
        fuel_cost: payload.fuel_cost,
        member_id: payload.member_id,
        car_id: payload.car_id,
    }
}

pub async fn refill_new(
    State(state): State<ServerState>,
    PathParams(space_id): PathParams<Uuid>,
    JsonBody(payload): JsonBody<RefillNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state
        .engine
        .new_refill(space_id, refill_input(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn get(
    State(state): State<ServerState>,
    PathParams((space_id, refill_id)): PathParams<(Uuid, Uuid)>,
) -> Result<Json<RefillView>, ServerError> {
    let refill = state.engine.refill(space_id, refill_id).await?;
    Ok(Json(views::refill(&refill)))
}

pub async fn refill_update(
    State(state): State<ServerState>,
    PathParams((space_id, refill_id)): PathParams<(Uuid, Uuid)>,
    JsonBody(payload): JsonBody<RefillNew>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_refill(space_id, refill_id, refill_input(payload))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn refill_delete(
    State(state): State<ServerState>,
    PathParams((space_id, refill_id)): PathParams<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_refill(space_id, refill_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
