use tracing::debug;

use shared_config::{endpoints, PortalConfig};
use shared_http::HttpClient;
use shared_models::ApiError;

use crate::models::{NewSpecialist, Specialist, SpecialistLookupError, SpecialistUpdate};

pub struct SpecialistService {
    http: HttpClient,
}

impl SpecialistService {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    pub async fn list(&self) -> Result<Vec<Specialist>, ApiError> {
        let value = self.http.get(&endpoints::specialists()).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn get(&self, code: i64) -> Result<Specialist, ApiError> {
        let value = self.http.get(&endpoints::specialist_by_id(code)).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn list_by_specialty(&self, specialty: &str) -> Result<Vec<Specialist>, ApiError> {
        let value = self
            .http
            .get(&endpoints::specialists_by_specialty(specialty))
            .await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn create(&self, specialist: &NewSpecialist) -> Result<Specialist, ApiError> {
        let body =
            serde_json::to_value(specialist).map_err(|err| ApiError::Decode(err.to_string()))?;
        let value = self.http.post(&endpoints::specialists(), body).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn update(
        &self,
        code: i64,
        update: &SpecialistUpdate,
    ) -> Result<Specialist, ApiError> {
        let body = serde_json::to_value(update).map_err(|err| ApiError::Decode(err.to_string()))?;
        let value = self
            .http
            .put(&endpoints::specialist_by_id(code), body)
            .await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn delete(&self, code: i64) -> Result<(), ApiError> {
        self.http.delete(&endpoints::specialist_by_id(code)).await?;
        Ok(())
    }

    /// Resolves a specialist by exact display name.
    ///
    /// The API has no lookup-by-name endpoint, so this scans the full list.
    /// Zero matches, more than one match, and a match without a `codigo`
    /// each fail with their own variant; there is no fuzzy matching.
    pub async fn find_by_name(&self, name: &str) -> Result<Specialist, SpecialistLookupError> {
        let specialists = self.list().await?;

        let mut matches: Vec<Specialist> = specialists
            .into_iter()
            .filter(|s| s.name == name)
            .collect();

        match matches.len() {
            0 => Err(SpecialistLookupError::NotFound(name.to_string())),
            1 => {
                let specialist = matches.remove(0);
                if specialist.code.is_none() {
                    return Err(SpecialistLookupError::MissingCode(name.to_string()));
                }
                debug!("specialist \"{}\" resolved to code {:?}", name, specialist.code);
                Ok(specialist)
            }
            count => Err(SpecialistLookupError::Ambiguous {
                name: name.to_string(),
                count,
            }),
        }
    }
}
