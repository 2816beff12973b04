//! Spaces, members and cars endpoints.

use api_types::{
    Created,
    space::{CarNew, MemberNew, MemberUpdate, SpaceNew, SpaceView},
};
use axum::{Json, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::{
    ServerError,
    extract::{JsonBody, PathParams},
    server::ServerState,
    views,
};

pub async fn space_new(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<SpaceNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state.engine.new_space(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn get(
    State(state): State<ServerState>,
    PathParams(space_id): PathParams<Uuid>,
) -> Result<Json<SpaceView>, ServerError> {
    let space = state.engine.space(space_id).await?;
    Ok(Json(views::space(&space)))
}

pub async fn space_delete(
    State(state): State<ServerState>,
    PathParams(space_id): PathParams<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_space(space_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn member_new(
    State(state): State<ServerState>,
    PathParams(space_id): PathParams<Uuid>,
    JsonBody(payload): JsonBody<MemberNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state
        .engine
        .new_member(space_id, &payload.name, payload.is_guest)
        .await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn member_update(
    State(state): State<ServerState>,
    PathParams((space_id, member_id)): PathParams<(Uuid, Uuid)>,
    JsonBody(payload): JsonBody<MemberUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .set_member_guest(space_id, member_id, payload.is_guest)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn member_delete(
    State(state): State<ServerState>,
    PathParams((space_id, member_id)): PathParams<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_member(space_id, member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn car_new(
    State(state): State<ServerState>,
    PathParams(space_id): PathParams<Uuid>,
    JsonBody(payload): JsonBody<CarNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state
        .engine
        .new_car(
            space_id,
            &payload.name,
            views::fuel_from_api(payload.fuel),
            payload.consumption,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn car_delete(
    State(state): State<ServerState>,
    PathParams((space_id, car_id)): PathParams<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_car(space_id, car_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
