//! Fixed keyword lists driving automatic progression
//!
//! All matching is case-insensitive substring containment over the message
//! text, first match wins. The lists are part of the stage-machine contract:
//! changing them changes observable transitions.

/// Phrases that mean the lead wants a human
///
/// Checked on every inbound message, before any progression rule; a hit
/// forces the handoff stage regardless of the current rule outcome.
pub const HUMAN_REQUEST_KEYWORDS: &[&str] = &[
    "falar com",
    "atendente",
    "corretor",
    "humano",
    "gerente",
    "não consigo",
    "nao consigo",
    "quero uma pessoa",
    "pessoa de verdade",
    "reclamação",
    "reclamacao",
];

/// Interest signals at the presentation stage
pub const INTEREST_KEYWORDS: &[&str] = &[
    "gostei",
    "interessante",
    "quero",
    "agendar",
    "visitar",
    "mais informações",
    "me interessa",
    "parece bom",
    "quero ver",
    "quero conhecer",
    "aceito",
];

/// Refinement signals at the presentation stage
pub const REFINEMENT_KEYWORDS: &[&str] = &[
    "outro",
    "diferente",
    "mais barato",
    "mais caro",
    "outra região",
    "outro bairro",
    "mais quartos",
    "maior",
    "menor",
    "não gostei",
];

/// Affirmative answers at the no-match stage ("want to try other options?")
pub const AFFIRMATIVE_KEYWORDS: &[&str] = &["sim", "quero", "tentar", "ok", "pode ser"];

/// Case-insensitive substring scan, list order
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let text = text.to_lowercase();
    keywords.iter().any(|kw| text.contains(kw))
}

/// True when the message asks for a human agent
pub fn detect_human_request(text: &str) -> bool {
    contains_any(text, HUMAN_REQUEST_KEYWORDS)
}
