use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::db::PlantStore;
use crate::models::{CreatePlantInput, Plant, UpdatePlantInput};

use super::error::ApiError;
use super::response::Envelope;
use super::validation::{optional_positive_int, optional_text, require_positive_int, require_text};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "plantas-service",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn list_plants(
    State(store): State<PlantStore>,
) -> Result<Json<Envelope<Vec<Plant>>>, ApiError> {
    let plants = store.get_all()?;
    Ok(Json(Envelope::list(plants)))
}

pub async fn get_plant(
    State(store): State<PlantStore>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<Plant>>, ApiError> {
    store
        .get(id)?
        .map(|plant| Json(Envelope::record(plant)))
        .ok_or_else(|| ApiError::plant_not_found(id))
}

pub async fn create_plant(
    State(store): State<PlantStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Plant>>), ApiError> {
    let Json(body) = body.map_err(bad_json)?;

    let input = CreatePlantInput {
        nombre: require_text(&body, "nombre")?,
        tipo: require_text(&body, "tipo")?,
        ubicacion: require_text(&body, "ubicacion")?,
        frecuencia_riego_dias: require_positive_int(&body, "frecuencia_riego_dias")?,
    };

    let plant = store.create(input)?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::record_with_message(plant, "plant created")),
    ))
}

pub async fn update_plant(
    State(store): State<PlantStore>,
    Path(id): Path<i64>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Plant>>, ApiError> {
    let Json(body) = body.map_err(bad_json)?;

    // Existence is checked before field validation, so an unknown id is a
    // 404 even when the body is also invalid.
    if !store.exists(id)? {
        return Err(ApiError::plant_not_found(id));
    }

    let input = UpdatePlantInput {
        nombre: optional_text(&body, "nombre")?,
        tipo: optional_text(&body, "tipo")?,
        ubicacion: optional_text(&body, "ubicacion")?,
        frecuencia_riego_dias: optional_positive_int(&body, "frecuencia_riego_dias")?,
    };

    let plant = store
        .update(id, input)?
        .ok_or_else(|| ApiError::plant_not_found(id))?;
    Ok(Json(Envelope::record_with_message(plant, "plant updated")))
}

pub async fn delete_plant(
    State(store): State<PlantStore>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<()>>, ApiError> {
    if store.delete(id)? {
        Ok(Json(Envelope::message(format!(
            "plant with id {id} deleted"
        ))))
    } else {
        Err(ApiError::plant_not_found(id))
    }
}

fn bad_json(rejection: JsonRejection) -> ApiError {
    ApiError::InvalidField(format!("invalid JSON body: {rejection}"))
}
