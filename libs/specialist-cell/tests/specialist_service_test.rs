use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::PortalConfig;
use shared_models::ApiError;
use specialist_cell::models::SpecialistLookupError;
use specialist_cell::services::SpecialistService;

fn test_config(uri: &str) -> PortalConfig {
    PortalConfig {
        base_url: uri.to_string(),
        timeout_ms: 2_000,
        max_retries: 1,
        retry_delay_ms: 0,
    }
}

fn dr(code: Option<i64>, name: &str, specialty: &str) -> serde_json::Value {
    json!({
        "codigo": code,
        "nome": name,
        "cpf": "98765432100",
        "email": "medico@example.com",
        "telefone1": "1133334444",
        "crm": "CRM/SP 123456",
        "especialidade": specialty,
        "disponivel": true
    })
}

#[tokio::test]
async fn find_by_name_resolves_a_unique_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialistas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            dr(Some(7), "Dr. A", "cardiologia"),
            dr(Some(8), "Dr. B", "dermatologia")
        ])))
        .mount(&mock_server)
        .await;

    let service = SpecialistService::new(&test_config(&mock_server.uri()));
    let specialist = service.find_by_name("Dr. A").await.unwrap();

    assert_eq!(specialist.code, Some(7));
    assert_eq!(specialist.specialty, "cardiologia");
}

#[tokio::test]
async fn find_by_name_fails_when_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialistas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            dr(Some(8), "Dr. B", "dermatologia")
        ])))
        .mount(&mock_server)
        .await;

    let service = SpecialistService::new(&test_config(&mock_server.uri()));
    let err = service.find_by_name("Dr. A").await.unwrap_err();

    assert_matches!(err, SpecialistLookupError::NotFound(name) => assert_eq!(name, "Dr. A"));
    let rendered = service.find_by_name("Dr. A").await.unwrap_err().to_string();
    assert!(rendered.contains("Dr. A"));
}

#[tokio::test]
async fn find_by_name_fails_on_duplicates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialistas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            dr(Some(7), "Dr. A", "cardiologia"),
            dr(Some(9), "Dr. A", "neurologia")
        ])))
        .mount(&mock_server)
        .await;

    let service = SpecialistService::new(&test_config(&mock_server.uri()));
    let err = service.find_by_name("Dr. A").await.unwrap_err();

    assert_matches!(err, SpecialistLookupError::Ambiguous { count: 2, .. });
}

#[tokio::test]
async fn find_by_name_fails_when_the_match_has_no_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialistas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            dr(None, "Dr. A", "cardiologia")
        ])))
        .mount(&mock_server)
        .await;

    let service = SpecialistService::new(&test_config(&mock_server.uri()));
    let err = service.find_by_name("Dr. A").await.unwrap_err();

    assert_matches!(err, SpecialistLookupError::MissingCode(_));
}

#[tokio::test]
async fn find_by_name_surfaces_api_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialistas"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let service = SpecialistService::new(&test_config(&mock_server.uri()));
    let err = service.find_by_name("Dr. A").await.unwrap_err();

    assert_matches!(err, SpecialistLookupError::Api(ApiError::Api { status: Some(500), .. }));
}

#[tokio::test]
async fn list_by_specialty_encodes_the_path_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialistas/especialidade/cl%C3%ADnica%20geral"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            dr(Some(3), "Dr. C", "clínica geral")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = SpecialistService::new(&test_config(&mock_server.uri()));
    let specialists = service.list_by_specialty("clínica geral").await.unwrap();

    assert_eq!(specialists.len(), 1);
    assert_eq!(specialists[0].code, Some(3));
}
