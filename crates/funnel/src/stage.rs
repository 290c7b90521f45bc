//! Stage catalog and transition table
//!
//! The 17 funnel stages are a fixed, ordered catalog. `order` drives
//! presentation only; transition legality lives exclusively in
//! [`FunnelStage::allowed_transitions`]: progression rules propose, this
//! table decides.

use serde::{Deserialize, Serialize};

/// One stage of the lead qualification funnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStage {
    /// First contact, greeting sent
    #[default]
    BoasVindas,
    /// Collecting qualification facts (budget, location, rooms)
    ColetaDados,
    /// Lead went quiet during data collection
    AguardandoInfo,
    /// Searching the portfolio for matches
    Matching,
    /// Presenting matched properties
    Apresentacao,
    /// No portfolio match for the stated criteria
    SemMatch,
    /// Refining criteria after a miss or rejection
    Refinamento,
    /// Lead expressed interest in a property
    Interesse,
    /// Scheduling a visit
    Agendamento,
    /// Visit scheduled
    VisitaAgendada,
    /// Visit done, gathering feedback
    PosVisita,
    /// Negotiating price and terms
    Negociacao,
    /// Formal offer made
    Proposta,
    /// Credit under analysis
    AnaliseCredito,
    /// Paperwork in progress
    Documentacao,
    /// Deal closed
    Finalizacao,
    /// Handed off to a human agent; automation stops here
    AtendimentoHumano,
}

/// Stage descriptor for listing/UI consumption
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageInfo {
    pub stage: FunnelStage,
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    /// Presentation order, 1..=17
    pub order: u8,
    /// Whether the system may move a lead out of this stage on its own
    pub automated: bool,
}

impl FunnelStage {
    /// The canonical stage key used on the wire and in the store
    pub fn key(&self) -> &'static str {
        match self {
            FunnelStage::BoasVindas => "boas_vindas",
            FunnelStage::ColetaDados => "coleta_dados",
            FunnelStage::AguardandoInfo => "aguardando_info",
            FunnelStage::Matching => "matching",
            FunnelStage::Apresentacao => "apresentacao",
            FunnelStage::SemMatch => "sem_match",
            FunnelStage::Refinamento => "refinamento",
            FunnelStage::Interesse => "interesse",
            FunnelStage::Agendamento => "agendamento",
            FunnelStage::VisitaAgendada => "visita_agendada",
            FunnelStage::PosVisita => "pos_visita",
            FunnelStage::Negociacao => "negociacao",
            FunnelStage::Proposta => "proposta",
            FunnelStage::AnaliseCredito => "analise_credito",
            FunnelStage::Documentacao => "documentacao",
            FunnelStage::Finalizacao => "finalizacao",
            FunnelStage::AtendimentoHumano => "atendimento_humano",
        }
    }

    /// Parse a stage key; unknown keys yield `None`
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.key() == key)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FunnelStage::BoasVindas => "Boas-vindas",
            FunnelStage::ColetaDados => "Coleta de dados",
            FunnelStage::AguardandoInfo => "Aguardando informações",
            FunnelStage::Matching => "Buscando imóveis",
            FunnelStage::Apresentacao => "Apresentação",
            FunnelStage::SemMatch => "Sem match",
            FunnelStage::Refinamento => "Refinamento",
            FunnelStage::Interesse => "Interesse",
            FunnelStage::Agendamento => "Agendamento",
            FunnelStage::VisitaAgendada => "Visita agendada",
            FunnelStage::PosVisita => "Pós-visita",
            FunnelStage::Negociacao => "Negociação",
            FunnelStage::Proposta => "Proposta",
            FunnelStage::AnaliseCredito => "Análise de crédito",
            FunnelStage::Documentacao => "Documentação",
            FunnelStage::Finalizacao => "Finalização",
            FunnelStage::AtendimentoHumano => "Atendimento humano",
        }
    }

    /// One-line description shown in the pipeline board
    pub fn description(&self) -> &'static str {
        match self {
            FunnelStage::BoasVindas => "Primeiro contato do lead com o assistente",
            FunnelStage::ColetaDados => "Levantando orçamento, localização e quartos",
            FunnelStage::AguardandoInfo => "Lead parou de responder durante a coleta",
            FunnelStage::Matching => "Cruzando o perfil do lead com o portfólio",
            FunnelStage::Apresentacao => "Imóveis compatíveis enviados ao lead",
            FunnelStage::SemMatch => "Nenhum imóvel compatível no momento",
            FunnelStage::Refinamento => "Ajustando os critérios de busca",
            FunnelStage::Interesse => "Lead demonstrou interesse em um imóvel",
            FunnelStage::Agendamento => "Combinando data e horário da visita",
            FunnelStage::VisitaAgendada => "Visita marcada com o corretor",
            FunnelStage::PosVisita => "Coletando feedback após a visita",
            FunnelStage::Negociacao => "Negociando valores e condições",
            FunnelStage::Proposta => "Proposta formal registrada",
            FunnelStage::AnaliseCredito => "Crédito do lead em análise",
            FunnelStage::Documentacao => "Documentação e contratos em andamento",
            FunnelStage::Finalizacao => "Negócio concluído",
            FunnelStage::AtendimentoHumano => "Conversa assumida por um atendente humano",
        }
    }

    /// Display color for the pipeline board
    pub fn color(&self) -> &'static str {
        match self {
            FunnelStage::BoasVindas => "#3B82F6",
            FunnelStage::ColetaDados => "#6366F1",
            FunnelStage::AguardandoInfo => "#94A3B8",
            FunnelStage::Matching => "#8B5CF6",
            FunnelStage::Apresentacao => "#0EA5E9",
            FunnelStage::SemMatch => "#F59E0B",
            FunnelStage::Refinamento => "#EAB308",
            FunnelStage::Interesse => "#10B981",
            FunnelStage::Agendamento => "#14B8A6",
            FunnelStage::VisitaAgendada => "#06B6D4",
            FunnelStage::PosVisita => "#22C55E",
            FunnelStage::Negociacao => "#84CC16",
            FunnelStage::Proposta => "#A3E635",
            FunnelStage::AnaliseCredito => "#FB923C",
            FunnelStage::Documentacao => "#F97316",
            FunnelStage::Finalizacao => "#16A34A",
            FunnelStage::AtendimentoHumano => "#EF4444",
        }
    }

    /// Presentation order, 1..=17. Does not imply transition legality.
    pub fn order(&self) -> u8 {
        match self {
            FunnelStage::BoasVindas => 1,
            FunnelStage::ColetaDados => 2,
            FunnelStage::AguardandoInfo => 3,
            FunnelStage::Matching => 4,
            FunnelStage::Apresentacao => 5,
            FunnelStage::SemMatch => 6,
            FunnelStage::Refinamento => 7,
            FunnelStage::Interesse => 8,
            FunnelStage::Agendamento => 9,
            FunnelStage::VisitaAgendada => 10,
            FunnelStage::PosVisita => 11,
            FunnelStage::Negociacao => 12,
            FunnelStage::Proposta => 13,
            FunnelStage::AnaliseCredito => 14,
            FunnelStage::Documentacao => 15,
            FunnelStage::Finalizacao => 16,
            FunnelStage::AtendimentoHumano => 17,
        }
    }

    /// Whether the system may move a lead out of this stage without a human
    pub fn is_automated(&self) -> bool {
        matches!(
            self,
            FunnelStage::BoasVindas
                | FunnelStage::ColetaDados
                | FunnelStage::AguardandoInfo
                | FunnelStage::Matching
                | FunnelStage::Apresentacao
                | FunnelStage::SemMatch
                | FunnelStage::Refinamento
        )
    }

    /// Fixed status line shown to agents for a lead in this stage
    pub fn status_message(&self) -> &'static str {
        match self {
            FunnelStage::BoasVindas => "Lead recebido, mensagem de boas-vindas enviada",
            FunnelStage::ColetaDados => "Coletando informações do lead",
            FunnelStage::AguardandoInfo => "Aguardando retorno do lead",
            FunnelStage::Matching => "Buscando imóveis compatíveis",
            FunnelStage::Apresentacao => "Imóveis apresentados ao lead",
            FunnelStage::SemMatch => "Sem imóveis compatíveis no momento",
            FunnelStage::Refinamento => "Refinando critérios de busca",
            FunnelStage::Interesse => "Lead interessado em imóvel",
            FunnelStage::Agendamento => "Agendando visita",
            FunnelStage::VisitaAgendada => "Visita agendada",
            FunnelStage::PosVisita => "Aguardando feedback da visita",
            FunnelStage::Negociacao => "Negociação em andamento",
            FunnelStage::Proposta => "Proposta enviada",
            FunnelStage::AnaliseCredito => "Análise de crédito em andamento",
            FunnelStage::Documentacao => "Documentação em andamento",
            FunnelStage::Finalizacao => "Negócio finalizado",
            FunnelStage::AtendimentoHumano => "Em atendimento humano",
        }
    }

    /// Funnel completion percentage, fixed per stage
    pub fn funnel_progress(&self) -> u8 {
        match self {
            FunnelStage::BoasVindas => 5,
            FunnelStage::ColetaDados => 10,
            FunnelStage::AguardandoInfo => 10,
            FunnelStage::Matching => 20,
            FunnelStage::SemMatch => 20,
            FunnelStage::Refinamento => 25,
            FunnelStage::Apresentacao => 30,
            FunnelStage::Interesse => 40,
            FunnelStage::Agendamento => 50,
            FunnelStage::VisitaAgendada => 60,
            FunnelStage::PosVisita => 65,
            FunnelStage::Negociacao => 75,
            FunnelStage::Proposta => 80,
            FunnelStage::AnaliseCredito => 85,
            FunnelStage::Documentacao => 90,
            FunnelStage::Finalizacao => 100,
            FunnelStage::AtendimentoHumano => 50,
        }
    }

    /// Legal direct moves out of this stage
    ///
    /// The single source of truth for transition legality. Human handoff is
    /// reachable from every stage and absorbing: its own list is empty.
    pub fn allowed_transitions(&self) -> &'static [FunnelStage] {
        use FunnelStage::*;
        match self {
            BoasVindas => &[ColetaDados, AtendimentoHumano],
            ColetaDados => &[Matching, AguardandoInfo, AtendimentoHumano],
            AguardandoInfo => &[ColetaDados, AtendimentoHumano],
            Matching => &[Apresentacao, SemMatch, AtendimentoHumano],
            Apresentacao => &[Interesse, Refinamento, AtendimentoHumano],
            SemMatch => &[Refinamento, AtendimentoHumano],
            Refinamento => &[Matching, AtendimentoHumano],
            Interesse => &[Agendamento, Refinamento, AtendimentoHumano],
            Agendamento => &[VisitaAgendada, AtendimentoHumano],
            VisitaAgendada => &[PosVisita, Agendamento, AtendimentoHumano],
            PosVisita => &[Negociacao, Refinamento, AtendimentoHumano],
            Negociacao => &[Proposta, AtendimentoHumano],
            Proposta => &[AnaliseCredito, Negociacao, AtendimentoHumano],
            AnaliseCredito => &[Documentacao, AtendimentoHumano],
            Documentacao => &[Finalizacao, AtendimentoHumano],
            Finalizacao => &[AtendimentoHumano],
            AtendimentoHumano => &[],
        }
    }

    /// Check whether a direct move to `target` is legal
    pub fn can_transition_to(&self, target: FunnelStage) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// The full catalog, sorted ascending by `order`
    pub fn all() -> &'static [FunnelStage] {
        use FunnelStage::*;
        &[
            BoasVindas,
            ColetaDados,
            AguardandoInfo,
            Matching,
            Apresentacao,
            SemMatch,
            Refinamento,
            Interesse,
            Agendamento,
            VisitaAgendada,
            PosVisita,
            Negociacao,
            Proposta,
            AnaliseCredito,
            Documentacao,
            Finalizacao,
            AtendimentoHumano,
        ]
    }

    /// Descriptor with every presentation attribute in one place
    pub fn info(&self) -> StageInfo {
        StageInfo {
            stage: *self,
            key: self.key(),
            label: self.label(),
            description: self.description(),
            color: self.color(),
            order: self.order(),
            automated: self.is_automated(),
        }
    }
}

impl std::fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// String-keyed transition check mirroring the store's stage keys
///
/// Unknown keys on either side are illegal, never an error.
pub fn is_valid_transition(current: &str, target: &str) -> bool {
    match (FunnelStage::from_key(current), FunnelStage::from_key(target)) {
        (Some(from), Some(to)) => from.can_transition_to(to),
        _ => false,
    }
}

/// Descriptor for a stage key; `None` for unknown keys
pub fn stage_info(key: &str) -> Option<StageInfo> {
    FunnelStage::from_key(key).map(|s| s.info())
}

/// Status line for a stage key; unknown keys fall back to `"Stage: <key>"`
pub fn stage_message(key: &str) -> String {
    match FunnelStage::from_key(key) {
        Some(stage) => stage.status_message().to_string(),
        None => format!("Stage: {}", key),
    }
}

/// Funnel completion for a stage key; unknown keys read as 0
pub fn funnel_progress(key: &str) -> u8 {
    FunnelStage::from_key(key)
        .map(|s| s.funnel_progress())
        .unwrap_or(0)
}
