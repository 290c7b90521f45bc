//! Lead records and fact-update bags
//!
//! A `Lead` is the flat record a prospective buyer accumulates over a
//! WhatsApp conversation. Storage belongs to the external collection store;
//! this crate only reads the fields and computes proposed new values, which
//! travel as a [`LeadUpdate`].

use serde::{Deserialize, Serialize};

/// Financing situation stated by the lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancingStatus {
    /// Will pay cash
    AVista,
    /// Needs bank financing
    Financiamento,
    /// Financing already approved
    FinanciamentoAprovado,
    /// FGTS balance as down payment
    Fgts,
}

impl FinancingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancingStatus::AVista => "a_vista",
            FinancingStatus::Financiamento => "financiamento",
            FinancingStatus::FinanciamentoAprovado => "financiamento_aprovado",
            FinancingStatus::Fgts => "fgts",
        }
    }
}

/// A prospective buyer record
///
/// Every qualification field is optional; facts arrive one message at a
/// time. The current funnel stage is kept as its string key; the funnel
/// crate owns the typed view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lead {
    /// Opaque id owned by the external store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Tenant (real-estate company) the lead belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,

    /// Current funnel stage key (e.g. "coleta_dados")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    /// Full name as given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,

    /// WhatsApp phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,

    /// CPF, digits only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Budget floor in BRL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orcamento_min: Option<f64>,

    /// Budget ceiling in BRL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orcamento_max: Option<f64>,

    /// Desired neighborhood or city, free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localizacao: Option<String>,

    /// Desired bedroom count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quartos: Option<u32>,

    /// Monthly income in BRL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renda_mensal: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado_civil: Option<String>,

    /// Family composition, free text ("casal, dois filhos")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composicao_familiar: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profissao: Option<String>,

    /// Income source ("CLT", "autônomo", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origem_renda: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub financiamento: Option<FinancingStatus>,

    /// Purchase timeline, free text ("6 meses")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prazo_compra: Option<String>,

    /// Purchase goal ("moradia", "investimento")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objetivo_compra: Option<String>,

    /// Property-type preference ("apartamento", "casa")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_imovel: Option<String>,

    /// Neighborhood preferences beyond the primary location
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferencias_bairro: Vec<String>,

    /// Amenity preferences ("piscina", "academia")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferencias_lazer: Vec<String>,

    /// Security preferences ("portaria 24h")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferencias_seguranca: Vec<String>,

    /// Free-text notes accumulated by agents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

impl Lead {
    /// Create an empty lead
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lead keyed by phone number
    pub fn with_telefone(telefone: impl Into<String>) -> Self {
        Self {
            telefone: Some(telefone.into()),
            ..Self::default()
        }
    }

    /// Set the current stage key
    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    /// Set the budget range
    pub fn orcamento(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.orcamento_min = min;
        self.orcamento_max = max;
        self
    }

    /// Set the desired location
    pub fn localizacao(mut self, localizacao: impl Into<String>) -> Self {
        self.localizacao = Some(localizacao.into());
        self
    }

    /// Set the desired bedroom count
    pub fn quartos(mut self, quartos: u32) -> Self {
        self.quartos = Some(quartos);
        self
    }

    /// True when at least one budget bound is known
    pub fn has_budget(&self) -> bool {
        self.orcamento_min.is_some() || self.orcamento_max.is_some()
    }

    /// True when a desired location is known
    pub fn has_location(&self) -> bool {
        self.localizacao
            .as_deref()
            .map(|l| !l.trim().is_empty())
            .unwrap_or(false)
    }

    /// True when the desired bedroom count is known
    pub fn has_rooms(&self) -> bool {
        self.quartos.is_some()
    }

    /// Display name for templates ("Cliente" when unknown)
    pub fn display_name(&self) -> &str {
        self.nome.as_deref().unwrap_or("Cliente")
    }
}

/// Proposed changes to a lead, computed from one message
///
/// The interpreter fills in only the fields it actually extracted; the
/// orchestrator persists the non-`None` ones. Inputs are never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orcamento_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orcamento_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localizacao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quartos: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renda_mensal: Option<f64>,
}

impl LeadUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field was extracted
    pub fn is_empty(&self) -> bool {
        self.nome.is_none()
            && self.cpf.is_none()
            && self.email.is_none()
            && self.orcamento_min.is_none()
            && self.orcamento_max.is_none()
            && self.localizacao.is_none()
            && self.quartos.is_none()
            && self.renda_mensal.is_none()
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merge(mut self, other: LeadUpdate) -> Self {
        self.nome = other.nome.or(self.nome);
        self.cpf = other.cpf.or(self.cpf);
        self.email = other.email.or(self.email);
        self.orcamento_min = other.orcamento_min.or(self.orcamento_min);
        self.orcamento_max = other.orcamento_max.or(self.orcamento_max);
        self.localizacao = other.localizacao.or(self.localizacao);
        self.quartos = other.quartos.or(self.quartos);
        self.renda_mensal = other.renda_mensal.or(self.renda_mensal);
        self
    }

    /// Write the extracted fields onto a lead record
    pub fn apply(&self, lead: &mut Lead) {
        if let Some(nome) = &self.nome {
            lead.nome = Some(nome.clone());
        }
        if let Some(cpf) = &self.cpf {
            lead.cpf = Some(cpf.clone());
        }
        if let Some(email) = &self.email {
            lead.email = Some(email.clone());
        }
        if let Some(min) = self.orcamento_min {
            lead.orcamento_min = Some(min);
        }
        if let Some(max) = self.orcamento_max {
            lead.orcamento_max = Some(max);
        }
        if let Some(localizacao) = &self.localizacao {
            lead.localizacao = Some(localizacao.clone());
        }
        if let Some(quartos) = self.quartos {
            lead.quartos = Some(quartos);
        }
        if let Some(renda) = self.renda_mensal {
            lead.renda_mensal = Some(renda);
        }
    }
}
