//! Walks the portal API's read-only endpoints against the live deployment.
//!
//! The remote wire contract has shifted before, so this is the tool to run
//! whenever behavior looks off: it exercises every GET path the client
//! depends on and summarizes which ones answered.

use anyhow::Result;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use encounter_cell::services::EncounterService;
use patient_cell::services::PatientService;
use shared_config::PortalConfig;
use specialist_cell::services::SpecialistService;

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PortalConfig::from_env();
    info!("probing portal API at {}", config.base_url);

    let patients = PatientService::new(&config);
    let specialists = SpecialistService::new(&config);
    let encounters = EncounterService::new(&config);

    let mut failures = 0u32;

    match patients.list().await {
        Ok(list) => info!("GET /clientes ok ({} patients)", list.len()),
        Err(err) => {
            failures += 1;
            error!("GET /clientes failed: {}", err);
        }
    }

    let mut probe_specialty = None;
    match specialists.list().await {
        Ok(list) => {
            info!("GET /especialistas ok ({} specialists)", list.len());
            probe_specialty = list.first().map(|s| s.specialty.clone());
        }
        Err(err) => {
            failures += 1;
            error!("GET /especialistas failed: {}", err);
        }
    }

    if let Some(specialty) = probe_specialty {
        match specialists.list_by_specialty(&specialty).await {
            Ok(list) => info!(
                "GET /especialistas/especialidade/{} ok ({} specialists)",
                specialty,
                list.len()
            ),
            Err(err) => {
                failures += 1;
                error!("GET /especialistas/especialidade/{} failed: {}", specialty, err);
            }
        }
    }

    match encounters.list().await {
        Ok(list) => info!("GET /atendimentos ok ({} encounters)", list.len()),
        Err(err) => {
            failures += 1;
            error!("GET /atendimentos failed: {}", err);
        }
    }

    if failures > 0 {
        anyhow::bail!("{} endpoint probe(s) failed", failures);
    }

    info!("all endpoint probes succeeded");
    Ok(())
}
