mod care;
mod error;
mod plants;
mod response;
mod validation;

use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::{CareStore, PlantStore};

pub use error::ApiError;
pub use response::Envelope;

/// Router for the plant registry service.
pub fn plants_router(store: PlantStore) -> Router {
    let api = Router::new()
        .route("/plantas", get(plants::list_plants))
        .route("/plantas", post(plants::create_plant))
        .route("/plantas/{id}", get(plants::get_plant))
        .route("/plantas/{id}", put(plants::update_plant))
        .route("/plantas/{id}", delete(plants::delete_plant));

    Router::new()
        .nest("/api", api)
        .route("/health", get(plants::health))
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// Router for the care log service.
pub fn care_router(store: CareStore) -> Router {
    let api = Router::new()
        .route("/cuidados", get(care::list_events))
        .route("/cuidados/{id}", get(care::get_event))
        .route("/cuidados/{id}", delete(care::delete_event))
        .route("/cuidados/planta/{planta_id}", get(care::list_events_for_plant))
        .route("/cuidados/riego", post(care::record_watering))
        .route("/cuidados/fertilizacion", post(care::record_fertilizing))
        .route("/cuidados/general", post(care::record_general));

    Router::new()
        .nest("/api", api)
        .route("/health", get(care::health))
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// Unknown routes answer with the same failure envelope as every other
/// error.
async fn unknown_route() -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::failure("endpoint not found")),
    )
}
