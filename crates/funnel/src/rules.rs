//! Automatic progression rules
//!
//! Each automated stage has one rule: a pure function of the lead's facts,
//! the last message, and the match results. Rules only *propose*; every
//! proposal is validated against the transition table before it is returned.
//! An illegal proposal is dropped (with a `tracing::warn!`), so individual
//! rules never need to duplicate the legality table.

use imobi_agent_core::{Lead, Message};

use crate::keywords::{
    contains_any, AFFIRMATIVE_KEYWORDS, INTEREST_KEYWORDS, REFINEMENT_KEYWORDS,
};
use crate::stage::FunnelStage;

/// Everything a progression rule may look at
#[derive(Debug, Clone, Copy)]
pub struct ProgressionInputs<'a> {
    pub lead: &'a Lead,
    pub last_message: Option<&'a Message>,
    /// Total messages exchanged with this lead
    pub message_count: u32,
    /// Message count at the previous rule evaluation, when known.
    /// The refinement rule fires on an increase.
    pub previous_message_count: Option<u32>,
    /// How many properties the last portfolio search returned
    pub matched_properties: usize,
}

impl<'a> ProgressionInputs<'a> {
    pub fn new(lead: &'a Lead) -> Self {
        Self {
            lead,
            last_message: None,
            message_count: 0,
            previous_message_count: None,
            matched_properties: 0,
        }
    }

    pub fn last_message(mut self, message: &'a Message) -> Self {
        self.last_message = Some(message);
        self
    }

    pub fn message_count(mut self, count: u32) -> Self {
        self.message_count = count;
        self
    }

    pub fn previous_message_count(mut self, count: u32) -> Self {
        self.previous_message_count = Some(count);
        self
    }

    pub fn matched_properties(mut self, count: usize) -> Self {
        self.matched_properties = count;
        self
    }

    fn last_incoming_text(&self) -> Option<&str> {
        self.last_message
            .filter(|m| m.is_incoming())
            .map(|m| m.effective_text())
    }
}

/// What the rule evaluation decided, including the discard diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionOutcome {
    /// The stage is manual-only: no rule exists
    NoRule,
    /// A rule exists but its conditions did not fire
    Stay,
    /// Rule fired and the transition is legal
    Advance(FunnelStage),
    /// Rule fired but proposed an illegal move; dropped
    Discarded { proposed: FunnelStage },
}

impl ProgressionOutcome {
    /// The stage to move to, if any
    pub fn next_stage(&self) -> Option<FunnelStage> {
        match self {
            ProgressionOutcome::Advance(stage) => Some(*stage),
            _ => None,
        }
    }
}

/// Raw per-stage proposal, before legality validation
fn propose(stage: FunnelStage, inputs: &ProgressionInputs<'_>) -> ProgressionOutcome {
    use FunnelStage::*;
    use ProgressionOutcome::*;

    match stage {
        // Greeting done: always move to data collection
        BoasVindas => Advance(ColetaDados),

        // Any qualification fact unlocks matching; a long silence-free
        // conversation with no facts parks the lead instead
        ColetaDados => {
            if inputs.lead.has_budget() || inputs.lead.has_location() || inputs.lead.has_rooms() {
                Advance(Matching)
            } else if inputs.message_count > 5 {
                Advance(AguardandoInfo)
            } else {
                Stay
            }
        }

        // Lead spoke again: back to collecting
        AguardandoInfo => match inputs.last_incoming_text() {
            Some(_) => Advance(ColetaDados),
            None => Stay,
        },

        // Search ran: present what we found, or admit there is nothing
        Matching => {
            if inputs.matched_properties > 0 {
                Advance(Apresentacao)
            } else {
                Advance(SemMatch)
            }
        }

        // Interest keywords win over refinement keywords, list order
        Apresentacao => match inputs.last_incoming_text() {
            Some(text) if contains_any(text, INTEREST_KEYWORDS) => Advance(Interesse),
            Some(text) if contains_any(text, REFINEMENT_KEYWORDS) => Advance(Refinamento),
            _ => Stay,
        },

        // "Want to try different criteria?": an affirmative moves on
        SemMatch => match inputs.last_incoming_text() {
            Some(text) if contains_any(text, AFFIRMATIVE_KEYWORDS) => Advance(Refinamento),
            _ => Stay,
        },

        // New messages arrived since the last check: criteria changed,
        // search again
        Refinamento => match inputs.previous_message_count {
            Some(previous) if inputs.message_count > previous => Advance(Matching),
            _ => Stay,
        },

        // Manual-only stages: an agent (or the human-request detector)
        // moves these
        Interesse | Agendamento | VisitaAgendada | PosVisita | Negociacao | Proposta
        | AnaliseCredito | Documentacao | Finalizacao | AtendimentoHumano => NoRule,
    }
}

/// Evaluate the progression rule for `stage`, with the discard diagnostic
///
/// Prefer [`calculate_next_stage`] unless the caller needs to distinguish
/// "no rule fired" from "rule fired but the move was illegal".
pub fn evaluate(stage: FunnelStage, inputs: &ProgressionInputs<'_>) -> ProgressionOutcome {
    match propose(stage, inputs) {
        ProgressionOutcome::Advance(target) => {
            if stage.can_transition_to(target) {
                tracing::debug!(from = stage.key(), to = target.key(), "stage rule fired");
                ProgressionOutcome::Advance(target)
            } else {
                tracing::warn!(
                    from = stage.key(),
                    proposed = target.key(),
                    "progression rule proposed an illegal transition, dropping"
                );
                ProgressionOutcome::Discarded { proposed: target }
            }
        }
        outcome => outcome,
    }
}

/// Next stage for a lead, or `None` when it should stay put
///
/// `None` covers three cases the caller cannot tell apart by design: the
/// stage is manual-only, the rule did not fire, or the rule proposed an
/// illegal move (see [`evaluate`] for the diagnostic variant).
pub fn calculate_next_stage(
    stage: FunnelStage,
    inputs: &ProgressionInputs<'_>,
) -> Option<FunnelStage> {
    evaluate(stage, inputs).next_stage()
}

#[cfg(test)]
mod tests {
    use super::*;
    use imobi_agent_core::Message;

    #[test]
    fn test_welcome_always_advances() {
        let lead = Lead::new();
        let inputs = ProgressionInputs::new(&lead);
        assert_eq!(
            calculate_next_stage(FunnelStage::BoasVindas, &inputs),
            Some(FunnelStage::ColetaDados)
        );
    }

    #[test]
    fn test_data_collection_waits_then_parks() {
        let lead = Lead::new();

        // No facts, short conversation: stay
        let inputs = ProgressionInputs::new(&lead).message_count(3);
        assert_eq!(calculate_next_stage(FunnelStage::ColetaDados, &inputs), None);
        assert_eq!(
            evaluate(FunnelStage::ColetaDados, &inputs),
            ProgressionOutcome::Stay
        );

        // No facts after six messages: park
        let inputs = ProgressionInputs::new(&lead).message_count(6);
        assert_eq!(
            calculate_next_stage(FunnelStage::ColetaDados, &inputs),
            Some(FunnelStage::AguardandoInfo)
        );
    }

    #[test]
    fn test_any_fact_category_unlocks_matching() {
        let with_budget = Lead::new().orcamento(Some(100_000.0), None);
        let with_location = Lead::new().localizacao("Moema");
        let with_rooms = Lead::new().quartos(3);

        for lead in [&with_budget, &with_location, &with_rooms] {
            let inputs = ProgressionInputs::new(lead).message_count(6);
            assert_eq!(
                calculate_next_stage(FunnelStage::ColetaDados, &inputs),
                Some(FunnelStage::Matching),
                "fact did not unlock matching"
            );
        }
    }

    #[test]
    fn test_awaiting_info_needs_incoming() {
        let lead = Lead::new();
        let incoming = Message::incoming("oi, ainda estou procurando");
        let outgoing = Message::outgoing("podemos continuar?");

        let inputs = ProgressionInputs::new(&lead).last_message(&incoming);
        assert_eq!(
            calculate_next_stage(FunnelStage::AguardandoInfo, &inputs),
            Some(FunnelStage::ColetaDados)
        );

        let inputs = ProgressionInputs::new(&lead).last_message(&outgoing);
        assert_eq!(calculate_next_stage(FunnelStage::AguardandoInfo, &inputs), None);
    }

    #[test]
    fn test_matching_splits_on_results() {
        let lead = Lead::new();

        let inputs = ProgressionInputs::new(&lead).matched_properties(2);
        assert_eq!(
            calculate_next_stage(FunnelStage::Matching, &inputs),
            Some(FunnelStage::Apresentacao)
        );

        let inputs = ProgressionInputs::new(&lead);
        assert_eq!(
            calculate_next_stage(FunnelStage::Matching, &inputs),
            Some(FunnelStage::SemMatch)
        );
    }

    #[test]
    fn test_presentation_keywords() {
        let lead = Lead::new();

        let interested = Message::incoming("gostei desse, quero conhecer");
        let inputs = ProgressionInputs::new(&lead).last_message(&interested);
        assert_eq!(
            calculate_next_stage(FunnelStage::Apresentacao, &inputs),
            Some(FunnelStage::Interesse)
        );

        let refine = Message::incoming("tem algo mais barato em outro bairro?");
        let inputs = ProgressionInputs::new(&lead).last_message(&refine);
        assert_eq!(
            calculate_next_stage(FunnelStage::Apresentacao, &inputs),
            Some(FunnelStage::Refinamento)
        );

        // Outgoing messages never trigger keyword rules
        let echo = Message::outgoing("gostei desse");
        let inputs = ProgressionInputs::new(&lead).last_message(&echo);
        assert_eq!(calculate_next_stage(FunnelStage::Apresentacao, &inputs), None);
    }

    #[test]
    fn test_no_match_affirmative() {
        let lead = Lead::new();

        let yes = Message::incoming("pode ser, vamos tentar");
        let inputs = ProgressionInputs::new(&lead).last_message(&yes);
        assert_eq!(
            calculate_next_stage(FunnelStage::SemMatch, &inputs),
            Some(FunnelStage::Refinamento)
        );

        let no = Message::incoming("deixa pra depois");
        let inputs = ProgressionInputs::new(&lead).last_message(&no);
        assert_eq!(calculate_next_stage(FunnelStage::SemMatch, &inputs), None);
    }

    #[test]
    fn test_refinement_fires_on_new_messages() {
        let lead = Lead::new();

        let inputs = ProgressionInputs::new(&lead)
            .message_count(8)
            .previous_message_count(6);
        assert_eq!(
            calculate_next_stage(FunnelStage::Refinamento, &inputs),
            Some(FunnelStage::Matching)
        );

        let inputs = ProgressionInputs::new(&lead)
            .message_count(8)
            .previous_message_count(8);
        assert_eq!(calculate_next_stage(FunnelStage::Refinamento, &inputs), None);

        // Unknown previous count: nothing to compare against
        let inputs = ProgressionInputs::new(&lead).message_count(8);
        assert_eq!(calculate_next_stage(FunnelStage::Refinamento, &inputs), None);
    }

    #[test]
    fn test_manual_stages_have_no_rule() {
        let lead = Lead::new();
        let msg = Message::incoming("sim, quero agendar a visita");
        let inputs = ProgressionInputs::new(&lead)
            .last_message(&msg)
            .message_count(20)
            .matched_properties(5);

        for stage in [
            FunnelStage::Interesse,
            FunnelStage::Agendamento,
            FunnelStage::VisitaAgendada,
            FunnelStage::PosVisita,
            FunnelStage::Negociacao,
            FunnelStage::Proposta,
            FunnelStage::AnaliseCredito,
            FunnelStage::Documentacao,
            FunnelStage::Finalizacao,
            FunnelStage::AtendimentoHumano,
        ] {
            assert_eq!(evaluate(stage, &inputs), ProgressionOutcome::NoRule);
            assert_eq!(calculate_next_stage(stage, &inputs), None);
        }
    }

    #[test]
    fn test_rules_never_propose_illegal_moves() {
        let leads = [
            Lead::new(),
            Lead::new().orcamento(Some(100_000.0), Some(300_000.0)),
            Lead::new().localizacao("Centro").quartos(2),
        ];
        let msg = Message::incoming("sim, gostei, quero outro mais barato");

        for lead in &leads {
            for count in [0, 6, 10] {
                for matched in [0, 3] {
                    let inputs = ProgressionInputs::new(lead)
                        .last_message(&msg)
                        .message_count(count)
                        .previous_message_count(count.saturating_sub(2))
                        .matched_properties(matched);

                    for stage in FunnelStage::all() {
                        if let Some(next) = calculate_next_stage(*stage, &inputs) {
                            assert!(
                                stage.can_transition_to(next),
                                "illegal move {} -> {}",
                                stage.key(),
                                next.key()
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_stalled_then_qualified_lead() {
        // Lead stuck in data collection after six messages
        let lead = Lead::new();
        let inputs = ProgressionInputs::new(&lead).message_count(6);
        assert_eq!(
            calculate_next_stage(FunnelStage::ColetaDados, &inputs),
            Some(FunnelStage::AguardandoInfo)
        );

        // Same lead with a budget set
        let lead = Lead::new().orcamento(Some(100_000.0), None);
        let inputs = ProgressionInputs::new(&lead).message_count(6);
        assert_eq!(
            calculate_next_stage(FunnelStage::ColetaDados, &inputs),
            Some(FunnelStage::Matching)
        );
    }
}
