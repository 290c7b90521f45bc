//! Inbound message handling
//!
//! One pure step of the conversation loop: extract facts from the message,
//! decide the stage move, pick a templated reply when one exists. The caller
//! persists facts and stage together so a message is never half applied.

use imobi_agent_core::{Lead, LeadUpdate, Message, Property};
use imobi_agent_funnel::{
    detect_human_request, evaluate, FunnelStage, ProgressionInputs, ProgressionOutcome,
};
use imobi_agent_interpreter::{
    generic_welcome, match_score, no_match_message, property_preview, FactExtractor,
};

/// Everything one inbound message brings to the table
#[derive(Debug, Clone, Copy)]
pub struct InboundContext<'a> {
    pub lead: &'a Lead,
    pub message: &'a Message,
    /// Total messages exchanged with this lead, including this one
    pub message_count: u32,
    /// Message count at the previous handling step, when the orchestrator
    /// tracked it
    pub previous_message_count: Option<u32>,
    /// Results of the last portfolio search for this lead
    pub matched_properties: &'a [Property],
    /// Local hour of day (0..=23) for greeting templates
    pub hour: u32,
}

impl<'a> InboundContext<'a> {
    pub fn new(lead: &'a Lead, message: &'a Message) -> Self {
        Self {
            lead,
            message,
            message_count: 0,
            previous_message_count: None,
            matched_properties: &[],
            hour: 12,
        }
    }

    pub fn message_count(mut self, count: u32) -> Self {
        self.message_count = count;
        self
    }

    pub fn previous_message_count(mut self, count: u32) -> Self {
        self.previous_message_count = Some(count);
        self
    }

    pub fn matched_properties(mut self, properties: &'a [Property]) -> Self {
        self.matched_properties = properties;
        self
    }

    pub fn hour(mut self, hour: u32) -> Self {
        self.hour = hour;
        self
    }
}

/// What the orchestrator should do after one message
#[derive(Debug, Clone)]
pub struct MessageOutcome {
    /// Facts extracted from the message text
    pub facts: LeadUpdate,
    /// Stage to move the lead to, already validated; `None` means stay
    pub next_stage: Option<FunnelStage>,
    /// Diagnostic view of the rule evaluation (human override not included)
    pub outcome: ProgressionOutcome,
    /// The message asked for a human agent
    pub human_requested: bool,
    /// Templated reply for stages that have one; `None` means the caller
    /// should ask the reply model
    pub reply: Option<String>,
}

/// Handle one inbound message
///
/// Pure over its inputs: the lead is cloned before facts are applied, and
/// the working copy drives the stage rule so facts extracted from this very
/// message already count. A human-request keyword forces the handoff stage
/// over whatever the rule decided, as long as the move is legal.
pub fn handle_message(ctx: &InboundContext<'_>) -> MessageOutcome {
    let text = ctx.message.effective_text();

    let facts = if ctx.message.is_incoming() {
        FactExtractor::default_instance().extract_all(text)
    } else {
        LeadUpdate::default()
    };

    let mut working = ctx.lead.clone();
    facts.apply(&mut working);

    // Missing stage means a brand-new lead; an unknown key disables
    // automation entirely (the store owns cleanup).
    let current = match working.stage.as_deref() {
        None => Some(FunnelStage::BoasVindas),
        Some(key) => FunnelStage::from_key(key),
    };

    let human_requested = ctx.message.is_incoming() && detect_human_request(text);

    let (outcome, mut next_stage) = match current {
        Some(stage) => {
            let inputs = ProgressionInputs::new(&working)
                .last_message(ctx.message)
                .message_count(ctx.message_count)
                .matched_properties(ctx.matched_properties.len());
            let inputs = match ctx.previous_message_count {
                Some(previous) => inputs.previous_message_count(previous),
                None => inputs,
            };

            let outcome = evaluate(stage, &inputs);
            (outcome, outcome.next_stage())
        }
        None => {
            tracing::warn!(stage = ?working.stage, "lead carries an unknown stage key");
            (ProgressionOutcome::NoRule, None)
        }
    };

    if human_requested {
        if let Some(stage) = current {
            if stage.can_transition_to(FunnelStage::AtendimentoHumano) {
                tracing::debug!(from = stage.key(), "human handoff requested");
                next_stage = Some(FunnelStage::AtendimentoHumano);
            }
        }
    }

    let reply = templated_reply(ctx, &working, next_stage);

    MessageOutcome {
        facts,
        next_stage,
        outcome,
        human_requested,
        reply,
    }
}

/// Canned reply for moves that have one; free-form stages return `None`
fn templated_reply(
    ctx: &InboundContext<'_>,
    working: &Lead,
    next_stage: Option<FunnelStage>,
) -> Option<String> {
    let first_name = working
        .nome
        .as_deref()
        .and_then(|n| n.split_whitespace().next());

    match next_stage? {
        FunnelStage::AtendimentoHumano => Some(
            "Claro! Vou te transferir para um de nossos corretores, já te atendem. 🙋".to_string(),
        ),
        FunnelStage::ColetaDados => Some(generic_welcome(ctx.hour, first_name)),
        FunnelStage::Apresentacao => best_match(ctx.matched_properties, working)
            .map(property_preview),
        FunnelStage::SemMatch => Some(no_match_message(working)),
        _ => None,
    }
}

/// Highest-scoring property for the lead's criteria
fn best_match<'a>(properties: &'a [Property], lead: &Lead) -> Option<&'a Property> {
    properties.iter().max_by(|a, b| {
        match_score(a, lead)
            .partial_cmp(&match_score(b, lead))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}
