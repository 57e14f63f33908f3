use axum::http::StatusCode;
use axum_test::TestServer;
use plantcare::api::{plants_router, Envelope};
use plantcare::db::PlantStore;
use plantcare::models::Plant;
use serde_json::json;

fn setup() -> TestServer {
    let store = PlantStore::open_memory().expect("Failed to create database");
    store.migrate().expect("Failed to migrate");
    let app = plants_router(store);
    TestServer::new(app).expect("Failed to create test server")
}

async fn create_monstera(server: &TestServer) -> Plant {
    let response = server
        .post("/api/plantas")
        .json(&json!({
            "nombre": "Monstera",
            "tipo": "Interior",
            "ubicacion": "Sala",
            "frecuencia_riego_dias": 7
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Envelope<Plant>>().data.expect("no data")
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn returns_empty_list_with_zero_count() {
        let server = setup();

        let response = server.get("/api/plantas").await;
        response.assert_status_ok();

        let envelope: Envelope<Vec<Plant>> = response.json();
        assert!(envelope.success);
        assert_eq!(envelope.count, Some(0));
        assert!(envelope.data.expect("no data").is_empty());
    }

    #[tokio::test]
    async fn lists_created_plants_with_count() {
        let server = setup();
        create_monstera(&server).await;

        let envelope: Envelope<Vec<Plant>> = server.get("/api/plantas").await.json();
        assert_eq!(envelope.count, Some(1));
        assert_eq!(envelope.data.expect("no data")[0].nombre, "Monstera");
    }
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn first_plant_gets_id_1_and_echoes_all_fields() {
        let server = setup();

        let plant = create_monstera(&server).await;
        assert_eq!(plant.id, 1);
        assert_eq!(plant.nombre, "Monstera");
        assert_eq!(plant.tipo, "Interior");
        assert_eq!(plant.ubicacion, "Sala");
        assert_eq!(plant.frecuencia_riego_dias, 7);
    }

    #[tokio::test]
    async fn missing_field_is_rejected_with_its_name() {
        let server = setup();

        let response = server
            .post("/api/plantas")
            .json(&json!({
                "nombre": "Monstera",
                "tipo": "Interior",
                "frecuencia_riego_dias": 7
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let envelope: Envelope<Plant> = response.json();
        assert!(!envelope.success);
        assert!(envelope.message.expect("no message").contains("ubicacion"));
    }

    #[tokio::test]
    async fn non_positive_or_non_integer_frequency_is_rejected() {
        let server = setup();

        for frecuencia in [json!(0), json!(-3), json!(7.5), json!("7")] {
            let response = server
                .post("/api/plantas")
                .json(&json!({
                    "nombre": "Monstera",
                    "tipo": "Interior",
                    "ubicacion": "Sala",
                    "frecuencia_riego_dias": frecuencia
                }))
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
        }

        // Nothing persisted
        let envelope: Envelope<Vec<Plant>> = server.get("/api/plantas").await.json();
        assert_eq!(envelope.count, Some(0));
    }
}

mod fetching {
    use super::*;

    #[tokio::test]
    async fn returns_the_record_by_id() {
        let server = setup();
        let plant = create_monstera(&server).await;

        let response = server.get(&format!("/api/plantas/{}", plant.id)).await;
        response.assert_status_ok();

        let envelope: Envelope<Plant> = response.json();
        assert_eq!(envelope.data.expect("no data").nombre, "Monstera");
    }

    #[tokio::test]
    async fn unknown_id_yields_404_envelope() {
        let server = setup();

        let response = server.get("/api/plantas/42").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let envelope: Envelope<Plant> = response.json();
        assert!(!envelope.success);
    }
}

mod updating {
    use super::*;

    #[tokio::test]
    async fn partial_update_preserves_absent_fields_and_advances_timestamp() {
        let server = setup();
        let plant = create_monstera(&server).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let response = server
            .put(&format!("/api/plantas/{}", plant.id))
            .json(&json!({
                "ubicacion": "Balcón",
                "frecuencia_riego_dias": 28
            }))
            .await;
        response.assert_status_ok();

        let updated = response.json::<Envelope<Plant>>().data.expect("no data");
        assert_eq!(updated.nombre, "Monstera");
        assert_eq!(updated.ubicacion, "Balcón");
        assert_eq!(updated.frecuencia_riego_dias, 28);
        assert!(updated.fecha_actualizacion > plant.fecha_actualizacion);
        assert_eq!(updated.fecha_creacion, plant.fecha_creacion);
    }

    #[tokio::test]
    async fn unknown_id_yields_404() {
        let server = setup();

        let response = server
            .put("/api/plantas/42")
            .json(&json!({"nombre": "Ghost"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_frequency_yields_400() {
        let server = setup();
        let plant = create_monstera(&server).await;

        let response = server
            .put(&format!("/api/plantas/{}", plant.id))
            .json(&json!({"frecuencia_riego_dias": -1}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Record is untouched
        let envelope: Envelope<Plant> = server.get(&format!("/api/plantas/{}", plant.id)).await.json();
        assert_eq!(envelope.data.expect("no data").frecuencia_riego_dias, 7);
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn delete_then_get_yields_not_found_and_second_delete_fails() {
        let server = setup();
        let plant = create_monstera(&server).await;

        let response = server.delete(&format!("/api/plantas/{}", plant.id)).await;
        response.assert_status_ok();
        assert!(response.json::<Envelope<()>>().success);

        server
            .get(&format!("/api/plantas/{}", plant.id))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .delete(&format!("/api/plantas/{}", plant.id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod service_plumbing {
    use super::*;

    #[tokio::test]
    async fn health_reports_the_service_name() {
        let server = setup();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "plantas-service");
    }

    #[tokio::test]
    async fn unknown_route_yields_the_failure_envelope() {
        let server = setup();

        let response = server.get("/api/nope").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let envelope: Envelope<()> = response.json();
        assert!(!envelope.success);
        assert!(envelope.message.is_some());
    }
}
