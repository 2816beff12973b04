//! Extractors rejecting with [`ServerError`], so malformed requests get the
//! same `{"error": ..}` body as engine failures.

use axum::extract::{FromRequest, FromRequestParts};

use crate::ServerError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct JsonBody<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ServerError))]
pub struct PathParams<T>(pub T);
