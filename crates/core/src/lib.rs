//! Core types for the real-estate lead conversation agent
//!
//! This crate provides the foundational types used across the workspace:
//! - Lead records and fact-update bags
//! - Conversation messages (WhatsApp turns)
//! - Property listings and the declarative match filter
//! - Collaborator seam traits (reply model, property store)
//! - Error types

pub mod error;
pub mod lead;
pub mod message;
pub mod property;
pub mod traits;

pub use error::{Error, Result};
pub use lead::{FinancingStatus, Lead, LeadUpdate};
pub use message::{Message, MessageDirection, MessageKind};
pub use property::{PriceFilter, Property, PropertyFilter};
pub use traits::{PropertyStore, ReplyModel, ReplyRequest};
