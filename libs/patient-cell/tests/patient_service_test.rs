use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patient_cell::models::{NewPatient, PatientError, SENTINEL_PATIENT_CODE};
use patient_cell::services::PatientService;
use shared_config::PortalConfig;
use shared_models::ApiError;

fn test_config(uri: &str) -> PortalConfig {
    PortalConfig {
        base_url: uri.to_string(),
        timeout_ms: 2_000,
        max_retries: 1,
        retry_delay_ms: 0,
    }
}

fn ana() -> NewPatient {
    NewPatient {
        name: "Ana Souza".to_string(),
        cpf: "12345678900".to_string(),
        email: "ana@example.com".to_string(),
        phone: "11999990000".to_string(),
        age: Some(34),
        birth_date: None,
        insurance_plan: Some("Unimed".to_string()),
        insurance_card: None,
    }
}

fn registered_ana(code: i64) -> serde_json::Value {
    json!({
        "codigo": code,
        "nome": "Ana Souza",
        "cpf": "12345678900",
        "email": "ana@example.com",
        "telefone1": "11999990000",
        "idade": 34,
        "convenio": "Unimed"
    })
}

#[tokio::test]
async fn list_masks_404_as_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&test_config(&mock_server.uri()));
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_masks_500_as_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "mensagem": "erro interno"
        })))
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&test_config(&mock_server.uri()));
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_propagates_unmasked_statuses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&test_config(&mock_server.uri()));
    let err = service.list().await.unwrap_err();
    assert_matches!(err, ApiError::Api { status: Some(403), .. });
}

#[tokio::test]
async fn list_handles_empty_and_non_array_payloads() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&test_config(&mock_server.uri()));
    assert!(service.list().await.unwrap().is_empty());
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_parses_the_created_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/clientes"))
        .and(body_partial_json(json!({"nome": "Ana Souza", "cpf": "12345678900"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(registered_ana(41)))
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&test_config(&mock_server.uri()));
    let created = service.create(&ana()).await.unwrap();
    assert_eq!(created.code, Some(41));
}

#[tokio::test]
async fn create_synthesizes_a_record_when_the_body_is_unreadable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&test_config(&mock_server.uri()));
    let created = service.create(&ana()).await.unwrap();

    assert_eq!(created.code, Some(SENTINEL_PATIENT_CODE));
    assert_eq!(created.name, "Ana Souza");
    assert_eq!(created.cpf, "12345678900");
}

#[tokio::test]
async fn create_propagates_validation_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "mensagem": "CPF inválido"
        })))
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&test_config(&mock_server.uri()));
    let err = service.create(&ana()).await.unwrap_err();
    assert_matches!(err, ApiError::Api { message, .. } => assert_eq!(message, "CPF inválido"));
}

#[tokio::test]
async fn find_or_create_returns_the_existing_record_without_creating() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "codigo": 5,
                "nome": "Ana S.",
                "cpf": "12345678900",
                "email": "old@example.com",
                "telefone1": "1188887777"
            }
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&test_config(&mock_server.uri()));
    let patient = service.find_or_create(&ana()).await.unwrap();

    // The record on the server wins over the submitted data.
    assert_eq!(patient.code, Some(5));
    assert_eq!(patient.email, "old@example.com");
}

#[tokio::test]
async fn find_or_create_creates_exactly_once_when_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(registered_ana(77)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&test_config(&mock_server.uri()));
    let patient = service.find_or_create(&ana()).await.unwrap();
    assert_eq!(patient.code, Some(77));
}

#[tokio::test]
async fn find_or_create_still_registers_through_a_degraded_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(registered_ana(78)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&test_config(&mock_server.uri()));
    let patient = service.find_or_create(&ana()).await.unwrap();
    assert_eq!(patient.code, Some(78));
}

#[tokio::test]
async fn find_or_create_wraps_upstream_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clientes"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&test_config(&mock_server.uri()));
    let err = service.find_or_create(&ana()).await.unwrap_err();
    assert_matches!(
        err,
        PatientError::Upsert {
            source: ApiError::Api { status: Some(502), .. }
        }
    );
}
