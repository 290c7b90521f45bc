//! Message-content-driven stage suggestion
//!
//! This is the conversational-flow variant of stage progression, distinct
//! from the funnel crate's rule table: it reads only the latest message and
//! the accumulated lead facts, uses its own keyword literals, and is total:
//! "no transition" is expressed by returning the input stage unchanged,
//! never by an error or `None`. The two rule sets are deliberately not
//! merged; reconciliation is tracked in DESIGN.md.

use imobi_agent_core::{Lead, Message};
use imobi_agent_funnel::FunnelStage;

use crate::matching::has_enough_data_for_matching;

/// Interest phrasing heard while presenting properties
const PRESENTATION_INTEREST: &[&str] = &["visita", "ver", "conhecer"];

/// Scheduling phrasing heard after interest is established
const SCHEDULING: &[&str] = &["agendar", "visitar", "quando posso"];

/// Willingness to retry after a no-match
const RETRY: &[&str] = &["sim", "pode ser", "quero tentar"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let text = text.to_lowercase();
    keywords.iter().any(|kw| text.contains(kw))
}

/// Suggest the next stage from the latest message
///
/// Callers must treat "same as input" as "no transition".
pub fn chat_stage_progression(
    stage: FunnelStage,
    lead: &Lead,
    last_message: &Message,
) -> FunnelStage {
    let text = last_message.effective_text();

    match stage {
        // All three criteria categories in hand: start searching
        FunnelStage::ColetaDados if has_enough_data_for_matching(lead) => FunnelStage::Matching,

        FunnelStage::Apresentacao if contains_any(text, PRESENTATION_INTEREST) => {
            FunnelStage::Interesse
        }

        FunnelStage::Interesse if contains_any(text, SCHEDULING) => FunnelStage::Agendamento,

        FunnelStage::SemMatch if contains_any(text, RETRY) => FunnelStage::Refinamento,

        _ => stage,
    }
}
