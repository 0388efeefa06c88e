use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::ApiError;

/// A credentialed care provider as the portal API stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialist {
    #[serde(rename = "codigo")]
    pub code: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    pub email: String,
    #[serde(rename = "telefone1")]
    pub phone: String,
    pub crm: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "idade", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(rename = "disponivel", default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSpecialist {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    pub email: String,
    #[serde(rename = "telefone1")]
    pub phone: String,
    pub crm: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "idade", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(rename = "disponivel", default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// Partial update; only the populated fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpecialistUpdate {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefone1", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "especialidade", skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(rename = "disponivel", skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// Failure modes of looking a specialist up by display name.
///
/// Names carry no uniqueness guarantee on the server, so absence, ambiguity
/// and a match without an identifier are all distinct, named outcomes rather
/// than a silent first-match.
#[derive(Error, Debug)]
pub enum SpecialistLookupError {
    #[error("specialist \"{0}\" not found")]
    NotFound(String),

    #[error("{count} specialists share the name \"{name}\"")]
    Ambiguous { name: String, count: usize },

    #[error("specialist \"{0}\" has no identifier assigned")]
    MissingCode(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}
