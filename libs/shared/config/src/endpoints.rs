//! Resource paths of the portal API, kept in one place because the remote
//! contract has already shifted once (an `/api` prefix came and went).

pub fn patients() -> String {
    "/clientes".to_string()
}

pub fn patient_by_id(code: i64) -> String {
    format!("/clientes/{}", code)
}

pub fn encounters() -> String {
    "/atendimentos".to_string()
}

pub fn encounter_by_id(code: i64) -> String {
    format!("/atendimentos/{}", code)
}

pub fn encounters_by_patient(patient_code: i64) -> String {
    format!("/atendimentos/cliente/{}", patient_code)
}

pub fn specialists() -> String {
    "/especialistas".to_string()
}

pub fn specialist_by_id(code: i64) -> String {
    format!("/especialistas/{}", code)
}

/// Specialty is free text coming straight from a form field, so the path
/// segment is percent-encoded.
pub fn specialists_by_specialty(specialty: &str) -> String {
    format!("/especialistas/especialidade/{}", urlencoding::encode(specialty))
}
