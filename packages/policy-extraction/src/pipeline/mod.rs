//! The extraction pipeline: instructions, orchestration, response decoding
//! and consolidation.

pub mod consolidate;
pub mod decode;
pub mod instructions;
pub mod orchestrate;
pub mod run;

pub use consolidate::{consolidate, find_coverage};
pub use decode::{decode_response, strip_code_fences};
pub use instructions::{
    CLAUSES_INSTRUCTION, COVERAGES_INSTRUCTION, FINANCIAL_INSTRUCTION, LOCATIONS_INSTRUCTION,
    MASTER_INSTRUCTION, POLICY_TASKS, TASK_CLAUSES, TASK_COVERAGES, TASK_LOCATIONS, TASK_MASTER,
};
pub use orchestrate::run_tasks;
pub use run::{write_record, Pipeline};
