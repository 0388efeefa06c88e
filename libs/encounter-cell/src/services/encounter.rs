use serde_json::Value;
use tracing::{debug, warn};

use shared_config::{endpoints, PortalConfig};
use shared_http::HttpClient;
use shared_models::ApiError;

use crate::models::{CreateEncounterRequest, Encounter, EncounterKind, EncounterUpdate};

pub struct EncounterService {
    http: HttpClient,
}

impl EncounterService {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    pub async fn list(&self) -> Result<Vec<Encounter>, ApiError> {
        let value = self.http.get(&endpoints::encounters()).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Client-side filter over `list()`; the API has no kind endpoint.
    pub async fn list_by_kind(&self, kind: EncounterKind) -> Result<Vec<Encounter>, ApiError> {
        let encounters = self.list().await?;
        Ok(encounters.into_iter().filter(|e| e.kind == kind).collect())
    }

    pub async fn get(&self, code: i64) -> Result<Encounter, ApiError> {
        let value = self.http.get(&endpoints::encounter_by_id(code)).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn list_by_patient(&self, patient_code: i64) -> Result<Vec<Encounter>, ApiError> {
        let value = self
            .http
            .get(&endpoints::encounters_by_patient(patient_code))
            .await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Books an encounter.
    ///
    /// The posted body carries the request fields plus a synthesized
    /// `descricao` line. As with patient creation, a 2xx with an unreadable
    /// body still counts as booked: the returned record is synthesized with
    /// sentinel `codigo` 0 and a placeholder protocol.
    pub async fn create(&self, request: &CreateEncounterRequest) -> Result<Encounter, ApiError> {
        let mut body =
            serde_json::to_value(request).map_err(|err| ApiError::Decode(err.to_string()))?;
        if let Value::Object(ref mut map) = body {
            map.insert("descricao".to_string(), Value::String(request.description()));
        }

        debug!(
            "booking {} for patient {} with specialist {}",
            request.kind, request.patient_code, request.specialist_code
        );

        let value = match self.http.post(&endpoints::encounters(), body).await {
            Ok(value) => value,
            Err(ApiError::Decode(reason)) => {
                warn!("encounter create succeeded but body was unreadable ({}), synthesizing record", reason);
                return Ok(request.synthesize());
            }
            Err(err) => return Err(err),
        };

        match serde_json::from_value(value) {
            Ok(created) => Ok(created),
            Err(err) => {
                warn!("encounter create succeeded but body was not an encounter ({}), synthesizing", err);
                Ok(request.synthesize())
            }
        }
    }

    pub async fn update(&self, code: i64, update: &EncounterUpdate) -> Result<Encounter, ApiError> {
        let body = serde_json::to_value(update).map_err(|err| ApiError::Decode(err.to_string()))?;
        let value = self.http.put(&endpoints::encounter_by_id(code), body).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Cancels an encounter on the server side. No status-transition rules
    /// are enforced here.
    pub async fn delete(&self, code: i64) -> Result<(), ApiError> {
        self.http.delete(&endpoints::encounter_by_id(code)).await?;
        Ok(())
    }
}
