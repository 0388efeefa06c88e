pub mod encounter;

pub use encounter::EncounterService;
