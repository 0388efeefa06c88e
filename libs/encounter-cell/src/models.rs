use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier stamped onto a synthesized record when the server reported a
/// successful create but returned no readable body.
pub const SENTINEL_ENCOUNTER_CODE: i64 = 0;
/// Protocol placeholder for the same situation.
pub const FALLBACK_PROTOCOL: &str = "SEM-PROTOCOLO";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterKind {
    #[serde(rename = "CONSULTA")]
    Consultation,
    #[serde(rename = "EXAME")]
    Exam,
}

impl fmt::Display for EncounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncounterKind::Consultation => write!(f, "CONSULTA"),
            EncounterKind::Exam => write!(f, "EXAME"),
        }
    }
}

/// Lifecycle states as the backend names them. The server defines no
/// transition table; this client does not invent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterStatus {
    #[serde(rename = "AGENDADO")]
    Scheduled,
    #[serde(rename = "CONFIRMADO")]
    Confirmed,
    #[serde(rename = "REALIZADO")]
    Completed,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

impl fmt::Display for EncounterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncounterStatus::Scheduled => write!(f, "AGENDADO"),
            EncounterStatus::Confirmed => write!(f, "CONFIRMADO"),
            EncounterStatus::Completed => write!(f, "REALIZADO"),
            EncounterStatus::Cancelled => write!(f, "CANCELADO"),
        }
    }
}

/// A consultation or exam as the portal API stores it. `protocolo` is the
/// confirmation code the remote system issues on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    #[serde(rename = "codigo")]
    pub code: Option<i64>,
    #[serde(rename = "clienteId", default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    #[serde(rename = "especialistaId", default, skip_serializing_if = "Option::is_none")]
    pub specialist_id: Option<i64>,
    #[serde(rename = "tipo")]
    pub kind: EncounterKind,
    #[serde(rename = "dataAtendimento")]
    pub scheduled_at: String,
    #[serde(rename = "horario", default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub status: EncounterStatus,
    #[serde(rename = "especialidade", default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(rename = "tipoExame", default, skip_serializing_if = "Option::is_none")]
    pub exam_type: Option<String>,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "protocolo", default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Payload for creating an encounter. `dataAtendimento` carries the wire
/// datetime format `yyyy-MM-dd HH:mm:ss`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEncounterRequest {
    #[serde(rename = "clienteCodigo")]
    pub patient_code: i64,
    #[serde(rename = "especialistaCodigo")]
    pub specialist_code: i64,
    #[serde(rename = "tipo")]
    pub kind: EncounterKind,
    #[serde(rename = "dataAtendimento")]
    pub scheduled_at: String,
    #[serde(rename = "horario")]
    pub time: String,
    pub status: EncounterStatus,
    #[serde(rename = "especialidade", skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(rename = "tipoExame", skip_serializing_if = "Option::is_none")]
    pub exam_type: Option<String>,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateEncounterRequest {
    /// Human-readable line the backend displays for the encounter.
    pub fn description(&self) -> String {
        match self.kind {
            EncounterKind::Consultation => {
                format!("Consulta - {}", self.specialty.as_deref().unwrap_or(""))
            }
            EncounterKind::Exam => {
                format!("Exame - {}", self.exam_type.as_deref().unwrap_or(""))
            }
        }
    }

    /// Best-effort record for a create that succeeded on the wire but came
    /// back without a readable body.
    pub(crate) fn synthesize(&self) -> Encounter {
        Encounter {
            code: Some(SENTINEL_ENCOUNTER_CODE),
            patient_id: Some(self.patient_code),
            specialist_id: Some(self.specialist_code),
            kind: self.kind,
            scheduled_at: self.scheduled_at.clone(),
            time: Some(self.time.clone()),
            status: self.status,
            specialty: self.specialty.clone(),
            exam_type: self.exam_type.clone(),
            notes: self.notes.clone(),
            protocol: Some(FALLBACK_PROTOCOL.to_string()),
        }
    }
}

/// Partial update; only the populated fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EncounterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EncounterStatus>,
    #[serde(rename = "dataAtendimento", skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    #[serde(rename = "horario", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
