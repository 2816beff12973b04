//! Journeys API endpoints.

use api_types::{
    Created,
    journey::{JourneyNew, JourneyView, MembershipChanges},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::JourneyInput;
use uuid::Uuid;

use crate::{
    ServerError,
    extract::{JsonBody, PathParams},
    server::ServerState,
    views,
};

fn journey_input(payload: JourneyNew) -> JourneyInput {
    JourneyInput {
        date: payload.date,
        name: payload.name,
        distance: payload.distance,
        fuel_cost: payload.fuel_cost,
        member_ids: payload.member_ids,
        car_id: payload.car_id,
    }
}

pub async fn journey_new(
    State(state): State<ServerState>,
    PathParams(space_id): PathParams<Uuid>,
    JsonBody(payload): JsonBody<JourneyNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state
        .engine
        .new_journey(space_id, journey_input(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn get(
    State(state): State<ServerState>,
    PathParams((space_id, journey_id)): PathParams<(Uuid, Uuid)>,
) -> Result<Json<JourneyView>, ServerError> {
    let journey = state.engine.journey(space_id, journey_id).await?;
    Ok(Json(views::journey(&journey)))
}

pub async fn journey_update(
    State(state): State<ServerState>,
    PathParams((space_id, journey_id)): PathParams<(Uuid, Uuid)>,
    JsonBody(payload): JsonBody<JourneyNew>,
) -> Result<Json<MembershipChanges>, ServerError> {
    let diff = state
        .engine
        .update_journey(space_id, journey_id, journey_input(payload))
        .await?;
    Ok(Json(views::membership_changes(diff)))
}

pub async fn journey_delete(
    State(state): State<ServerState>,
    PathParams((space_id, journey_id)): PathParams<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_journey(space_id, journey_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
