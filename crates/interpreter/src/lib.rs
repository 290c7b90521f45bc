//! Conversation interpreter
//!
//! Pure text analysis over one WhatsApp message: structured-fact extraction
//! (budget, CPF, email, rooms, income), CPF validation, property match
//! scoring, the message-content-driven stage suggestion, and the pt-BR
//! message templates. No I/O and no shared state: every function is safe to
//! call concurrently and idempotent over its inputs.

pub mod cpf;
pub mod extract;
pub mod matching;
pub mod messages;
pub mod progression;

pub use cpf::validate_cpf;
pub use extract::{normalize_numeric_value, BudgetRange, FactExtractor};
pub use matching::{build_property_filter, has_enough_data_for_matching, match_score};
pub use messages::{
    conversation_history, format_currency, generic_welcome, no_match_message,
    property_highlights, property_preview, property_welcome, time_greeting,
};
pub use progression::chat_stage_progression;
