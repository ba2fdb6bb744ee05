//! Domain data types: tasks, results, payload schemas, the canonical
//! record and pipeline configuration.

pub mod config;
pub mod payload;
pub mod record;
pub mod task;

pub use config::PipelineConfig;
pub use payload::{
    ClausesPayload, CoveragesPayload, FinancialPayload, LocationsPayload, MasterPayload,
};
pub use record::{
    CanonicalRecord, CoInsurer, CoverageEntry, FinancialBreakdown, FinancialGeneral, Installment,
    InstallmentTotals, LineEntry, Participant, PolicyHeader, RiskLocation, RunMetadata,
};
pub use task::{ExtractionResult, ExtractionTask, FailureKind, TaskFailure, TaskResultSet};
