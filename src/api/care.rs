use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::db::CareStore;
use crate::models::CareEvent;

use super::error::ApiError;
use super::response::Envelope;
use super::validation::{
    optional_note, require_positive_int, require_positive_number, require_string, require_text,
};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cuidados-service",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn list_events(
    State(store): State<CareStore>,
) -> Result<Json<Envelope<Vec<CareEvent>>>, ApiError> {
    let events = store.get_all()?;
    Ok(Json(Envelope::list(events)))
}

pub async fn get_event(
    State(store): State<CareStore>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<CareEvent>>, ApiError> {
    store
        .get(id)?
        .map(|event| Json(Envelope::record(event)))
        .ok_or_else(|| ApiError::event_not_found(id))
}

/// Events for one plant. An unused plant id is not an error; the result
/// is simply an empty list.
pub async fn list_events_for_plant(
    State(store): State<CareStore>,
    Path(planta_id): Path<i64>,
) -> Result<Json<Envelope<Vec<CareEvent>>>, ApiError> {
    let events = store.get_by_plant(planta_id)?;
    Ok(Json(Envelope::list_for_plant(events, planta_id)))
}

pub async fn record_watering(
    State(store): State<CareStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<CareEvent>>), ApiError> {
    let Json(body) = body.map_err(bad_json)?;

    let planta_id = require_positive_int(&body, "planta_id")?;
    let cantidad_ml = require_positive_number(&body, "cantidad_ml")?;
    let notas = optional_note(&body, "notas")?;

    let event = store.record_watering(planta_id, cantidad_ml, notas)?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::record_with_message(event, "watering recorded")),
    ))
}

pub async fn record_fertilizing(
    State(store): State<CareStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<CareEvent>>), ApiError> {
    let Json(body) = body.map_err(bad_json)?;

    let planta_id = require_positive_int(&body, "planta_id")?;
    let tipo_fertilizante = require_text(&body, "tipo_fertilizante")?;
    // Free-form amount, unit strings like "10ml" included.
    let cantidad = require_string(&body, "cantidad")?;
    let notas = optional_note(&body, "notas")?;

    let event = store.record_fertilizing(planta_id, tipo_fertilizante, cantidad, notas)?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::record_with_message(event, "fertilizing recorded")),
    ))
}

pub async fn record_general(
    State(store): State<CareStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<CareEvent>>), ApiError> {
    let Json(body) = body.map_err(bad_json)?;

    let planta_id = require_positive_int(&body, "planta_id")?;
    let descripcion = require_text(&body, "descripcion")?;
    let notas = optional_note(&body, "notas")?;

    let event = store.record_general(planta_id, descripcion, notas)?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::record_with_message(event, "care recorded")),
    ))
}

pub async fn delete_event(
    State(store): State<CareStore>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<()>>, ApiError> {
    if store.delete(id)? {
        Ok(Json(Envelope::message(format!(
            "care event with id {id} deleted"
        ))))
    } else {
        Err(ApiError::event_not_found(id))
    }
}

fn bad_json(rejection: JsonRejection) -> ApiError {
    ApiError::InvalidField(format!("invalid JSON body: {rejection}"))
}
