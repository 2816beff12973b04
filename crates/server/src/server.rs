use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use std::sync::Arc;

use crate::{journeys, ledger, refills, spaces};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/spaces", post(spaces::space_new))
        .route(
            "/spaces/{space_id}",
            get(spaces::get).delete(spaces::space_delete),
        )
        .route("/spaces/{space_id}/members", post(spaces::member_new))
        .route(
            "/spaces/{space_id}/members/{member_id}",
            patch(spaces::member_update).delete(spaces::member_delete),
        )
        .route("/spaces/{space_id}/cars", post(spaces::car_new))
        .route(
            "/spaces/{space_id}/cars/{car_id}",
            delete(spaces::car_delete),
        )
        .route("/spaces/{space_id}/ledger", get(ledger::list))
        .route("/spaces/{space_id}/balances", get(ledger::balances))
        .route("/spaces/{space_id}/journeys", post(journeys::journey_new))
        .route(
            "/spaces/{space_id}/journeys/{journey_id}",
            get(journeys::get)
                .put(journeys::journey_update)
                .delete(journeys::journey_delete),
        )
        .route("/spaces/{space_id}/refills", post(refills::refill_new))
        .route(
            "/spaces/{space_id}/refills/{refill_id}",
            get(refills::get)
                .put(refills::refill_update)
                .delete(refills::refill_delete),
        )
        .with_state(state)
}

/// Build the HTTP application over `engine`.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}
