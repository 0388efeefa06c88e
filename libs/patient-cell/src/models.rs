use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::ApiError;

/// Identifier stamped onto a synthesized record when the server reported a
/// successful create but returned no readable body.
pub const SENTINEL_PATIENT_CODE: i64 = 0;

/// A patient as the portal API stores it. The remote service assigns
/// `codigo`; the CPF is the only reliable de-duplication key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "codigo")]
    pub code: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    pub email: String,
    #[serde(rename = "telefone1")]
    pub phone: String,
    #[serde(rename = "idade", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(rename = "dataNascimento", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "convenio", default, skip_serializing_if = "Option::is_none")]
    pub insurance_plan: Option<String>,
    #[serde(rename = "numeroCarteirinha", default, skip_serializing_if = "Option::is_none")]
    pub insurance_card: Option<String>,
    #[serde(rename = "dataCadastro", default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
}

/// Patient data as submitted by a form, before the server has assigned a
/// `codigo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    pub email: String,
    #[serde(rename = "telefone1")]
    pub phone: String,
    #[serde(rename = "idade", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(rename = "dataNascimento", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "convenio", default, skip_serializing_if = "Option::is_none")]
    pub insurance_plan: Option<String>,
    #[serde(rename = "numeroCarteirinha", default, skip_serializing_if = "Option::is_none")]
    pub insurance_card: Option<String>,
}

impl NewPatient {
    /// Best-effort record for a create that succeeded on the wire but came
    /// back without a readable body.
    pub(crate) fn synthesize(&self) -> Patient {
        Patient {
            code: Some(SENTINEL_PATIENT_CODE),
            name: self.name.clone(),
            cpf: self.cpf.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            age: self.age,
            birth_date: self.birth_date,
            address: None,
            insurance_plan: self.insurance_plan.clone(),
            insurance_card: self.insurance_card.clone(),
            registered_at: None,
        }
    }
}

/// Partial update; only the populated fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientUpdate {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefone1", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "idade", skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(rename = "endereco", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "convenio", skip_serializing_if = "Option::is_none")]
    pub insurance_plan: Option<String>,
    #[serde(rename = "numeroCarteirinha", skip_serializing_if = "Option::is_none")]
    pub insurance_card: Option<String>,
}

#[derive(Error, Debug)]
pub enum PatientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to resolve patient record: {source}")]
    Upsert {
        #[source]
        source: ApiError,
    },
}
