use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

use encounter_cell::models::{
    CreateEncounterRequest, Encounter, EncounterKind, EncounterStatus, SENTINEL_ENCOUNTER_CODE,
};
use encounter_cell::services::EncounterService;
use patient_cell::services::PatientService;
use shared_config::PortalConfig;
use specialist_cell::models::SpecialistLookupError;
use specialist_cell::services::SpecialistService;

use crate::models::{
    ConsultationRequest, ExamPeriod, ExamRequest, SchedulingError, FALLBACK_EXAM_SPECIALIST_CODE,
};

/// Translates the portal's scheduling forms into encounter bookings.
///
/// Steps are sequential and there is no rollback: a patient registered by
/// the upsert stays registered even when the encounter booking afterwards
/// fails. Re-submitting is safe because the upsert finds the existing
/// record on the next pass.
pub struct SchedulingService {
    patients: PatientService,
    specialists: SpecialistService,
    encounters: EncounterService,
}

impl SchedulingService {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            patients: PatientService::new(config),
            specialists: SpecialistService::new(config),
            encounters: EncounterService::new(config),
        }
    }

    pub async fn schedule_consultation(
        &self,
        request: &ConsultationRequest,
    ) -> Result<String, SchedulingError> {
        info!(
            "scheduling consultation in {} for CPF {}",
            request.specialty, request.patient.cpf
        );

        let patient = self.patients.find_or_create(&request.patient).await?;
        let patient_code = patient.code.ok_or(SchedulingError::MissingPatientCode)?;

        let specialist = self
            .specialists
            .find_by_name(&request.specialist_name)
            .await?;
        let specialist_code = specialist.code.ok_or_else(|| {
            SpecialistLookupError::MissingCode(request.specialist_name.clone())
        })?;

        let encounter = self
            .encounters
            .create(&CreateEncounterRequest {
                patient_code,
                specialist_code,
                kind: EncounterKind::Consultation,
                scheduled_at: wire_datetime(request.date, request.time),
                time: wire_time(request.time),
                status: EncounterStatus::Scheduled,
                specialty: Some(request.specialty.clone()),
                exam_type: None,
                notes: request.notes.clone(),
            })
            .await?;

        Ok(format!(
            "Consulta agendada com sucesso! Protocolo: {}",
            confirmation_reference(&encounter)
        ))
    }

    pub async fn schedule_exam(&self, request: &ExamRequest) -> Result<String, SchedulingError> {
        info!(
            "scheduling {} exam for CPF {}",
            request.exam_type, request.patient.cpf
        );

        let patient = self.patients.find_or_create(&request.patient).await?;
        let patient_code = patient.code.ok_or(SchedulingError::MissingPatientCode)?;

        // The exam form has no specialist field. The first listed specialist
        // is assigned, or code 1 when the list is empty; a placeholder kept
        // for parity with the deployed backend.
        let specialists = self.specialists.list().await?;
        let specialist_code = specialists
            .first()
            .and_then(|s| s.code)
            .unwrap_or_else(|| {
                warn!("no specialists listed, assigning fallback code {}", FALLBACK_EXAM_SPECIALIST_CODE);
                FALLBACK_EXAM_SPECIALIST_CODE
            });

        let time = exam_time(request.period, request.time);

        let encounter = self
            .encounters
            .create(&CreateEncounterRequest {
                patient_code,
                specialist_code,
                kind: EncounterKind::Exam,
                scheduled_at: wire_datetime(request.date, time),
                time: wire_time(time),
                status: EncounterStatus::Scheduled,
                specialty: None,
                exam_type: Some(request.exam_type.clone()),
                notes: request.notes.clone(),
            })
            .await?;

        Ok(format!(
            "Exame agendado com sucesso! Protocolo: {}",
            confirmation_reference(&encounter)
        ))
    }

    /// Every encounter belonging to the patient registered under `cpf`, or
    /// an empty list when the CPF is unknown.
    pub async fn encounters_by_national_id(
        &self,
        cpf: &str,
    ) -> Result<Vec<Encounter>, SchedulingError> {
        let patients = self.patients.list().await.map_err(SchedulingError::Api)?;

        let Some(code) = patients
            .into_iter()
            .find(|p| p.cpf == cpf)
            .and_then(|p| p.code)
        else {
            return Ok(Vec::new());
        };

        Ok(self.encounters.list_by_patient(code).await?)
    }
}

/// `yyyy-MM-dd HH:mm:ss`, the only datetime shape the backend accepts.
/// Seconds are always zero; the forms only offer minute precision.
fn wire_datetime(date: NaiveDate, time: NaiveTime) -> String {
    format!("{} {}:00", date.format("%Y-%m-%d"), time.format("%H:%M"))
}

fn wire_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Period wins over an explicit time; with neither, the morning slot is used.
fn exam_time(period: Option<ExamPeriod>, explicit: Option<NaiveTime>) -> NaiveTime {
    match (period, explicit) {
        (Some(period), _) => period.start_time(),
        (None, Some(time)) => time,
        (None, None) => ExamPeriod::Morning.start_time(),
    }
}

fn confirmation_reference(encounter: &Encounter) -> String {
    match &encounter.protocol {
        Some(protocol) if !protocol.is_empty() => protocol.clone(),
        _ => encounter
            .code
            .unwrap_or(SENTINEL_ENCOUNTER_CODE)
            .to_string(),
    }
}
