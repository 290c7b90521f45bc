//! Property listings and the declarative match filter
//!
//! `PropertyFilter` describes which listings fit a lead; it is handed to the
//! external collection store, never executed here. The store contract is a
//! filtered read over the tenant's `imoveis` collection.

use serde::{Deserialize, Serialize};

/// A property listing as read from the external store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Property {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    /// Listing title shown to the lead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    /// Sale price in BRL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor_venda: Option<f64>,
    /// Bedroom count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dormitorios: Option<u32>,
    /// Suite count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suites: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    /// Highlights: JSON array, comma list or free text, parsed by the
    /// interpreter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destaques: Option<String>,
}

impl Property {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titulo(mut self, titulo: impl Into<String>) -> Self {
        self.titulo = Some(titulo.into());
        self
    }

    pub fn valor_venda(mut self, valor: f64) -> Self {
        self.valor_venda = Some(valor);
        self
    }

    pub fn dormitorios(mut self, dormitorios: u32) -> Self {
        self.dormitorios = Some(dormitorios);
        self
    }

    pub fn bairro(mut self, bairro: impl Into<String>) -> Self {
        self.bairro = Some(bairro.into());
        self
    }

    pub fn cidade(mut self, cidade: impl Into<String>) -> Self {
        self.cidade = Some(cidade.into());
        self
    }
}

/// Price constraint of a [`PropertyFilter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFilter {
    /// Price between the two bounds, inclusive
    Between { min: f64, max: f64 },
    /// Price at or below the ceiling
    AtMost { max: f64 },
    /// Price at or above the floor
    AtLeast { min: f64 },
}

/// Declarative query for listings that fit a lead
///
/// Always scoped to active, publicly listed, for-sale properties; the
/// optional constraints narrow from there. The external store translates
/// this into its own query language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Only active listings
    pub ativo: bool,
    /// Only publicly visible listings
    pub publico: bool,
    /// Only sale listings (as opposed to rental)
    pub finalidade_venda: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preco: Option<PriceFilter>,
    /// Minimum bedroom count, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dormitorios_min: Option<u32>,
    /// Case-insensitive substring matched against bairro OR cidade
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localizacao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

impl PropertyFilter {
    /// Base filter: active + public + sale, nothing else
    pub fn for_sale() -> Self {
        Self {
            ativo: true,
            publico: true,
            finalidade_venda: true,
            ..Self::default()
        }
    }

    pub fn preco(mut self, preco: PriceFilter) -> Self {
        self.preco = Some(preco);
        self
    }

    pub fn dormitorios_min(mut self, min: u32) -> Self {
        self.dormitorios_min = Some(min);
        self
    }

    pub fn localizacao(mut self, localizacao: impl Into<String>) -> Self {
        self.localizacao = Some(localizacao.into());
        self
    }

    pub fn company(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }
}
