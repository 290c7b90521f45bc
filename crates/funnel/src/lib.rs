//! Lead funnel state machine
//!
//! Owns the 17-stage funnel: the stage catalog, the legal-transition table,
//! and the automatic progression rules that move a lead forward from
//! conversation signals. Everything here is pure computation over static
//! tables; the catalog is fixed at compile time and never mutated.

pub mod keywords;
pub mod rules;
pub mod stage;

pub use keywords::detect_human_request;
pub use rules::{calculate_next_stage, evaluate, ProgressionInputs, ProgressionOutcome};
pub use stage::{
    funnel_progress, is_valid_transition, stage_info, stage_message, FunnelStage, StageInfo,
};
