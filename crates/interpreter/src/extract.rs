//! Structured-fact extraction from free text
//!
//! Patterns are compiled once in [`FactExtractor::new`] and reused for every
//! message. Monetary magnitudes go through a unit normalizer: "milhão" and
//! "milhões" multiply by 1.000.000, "mil" and "k" by 1.000, everything else
//! is parsed as a pt-BR formatted number (thousands `.`, decimal `,`).

use once_cell::sync::Lazy;
use regex::Regex;

use imobi_agent_core::LeadUpdate;

/// Extracted budget bounds; both `None` when nothing matched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BudgetRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Compiled extraction patterns
pub struct FactExtractor {
    cpf: Regex,
    email: Regex,
    budget_range: Regex,
    budget_ceiling: Regex,
    income: Regex,
    income_fallback: Regex,
    rooms: Regex,
}

static DEFAULT: Lazy<FactExtractor> = Lazy::new(FactExtractor::new);

impl FactExtractor {
    pub fn new() -> Self {
        Self {
            // Punctuated form first so "123.456.789-09" is not read as two
            // bare digit runs
            cpf: Regex::new(r"\b(\d{3}\.\d{3}\.\d{3}-\d{2}|\d{11})\b").unwrap(),
            email: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap(),
            budget_range: Regex::new(
                r"(?i)\b(?:de|entre)\s+(?:r\$\s*)?([\d.,]+)\s*(mil\b|k\b|milh(?:ão|ões|oes))?\s+(?:a|e|até|ate)\s+(?:r\$\s*)?([\d.,]+)\s*(mil\b|k\b|milh(?:ão|ões|oes))?",
            )
            .unwrap(),
            budget_ceiling: Regex::new(
                r"(?i)\b(?:até|ate|no m[áa]ximo|m[áa]ximo(?:\s+de)?)\s+(?:r\$\s*)?([\d.,]+)\s*(mil\b|k\b|milh(?:ão|ões|oes))?",
            )
            .unwrap(),
            income: Regex::new(r"(?i)renda[^0-9]{0,40}?(?:r\$\s*)?([\d.,]+)\s*(mil\b)?").unwrap(),
            income_fallback: Regex::new(r"\b(\d{4,7})\b").unwrap(),
            rooms: Regex::new(r"(?i)\b(\d{1,2})\s*(?:quartos?|dormit[óo]rios?|qtos?\b)").unwrap(),
        }
    }

    /// Shared default instance with the standard patterns
    pub fn default_instance() -> &'static FactExtractor {
        &DEFAULT
    }

    /// CPF as an 11-digit string, punctuation stripped
    pub fn cpf(&self, text: &str) -> Option<String> {
        let matched = self.cpf.captures(text)?.get(1)?.as_str();
        let digits: String = matched.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() == 11 {
            Some(digits)
        } else {
            None
        }
    }

    /// First email in the text, lowercased
    pub fn email(&self, text: &str) -> Option<String> {
        self.email
            .find(text)
            .map(|m| m.as_str().to_lowercase())
    }

    /// Budget range or ceiling mentioned in the text
    ///
    /// The range form ("de X a Y", "entre X e Y") takes precedence over the
    /// ceiling form ("até X", "máximo X").
    pub fn budget(&self, text: &str) -> BudgetRange {
        if let Some(caps) = self.budget_range.captures(text) {
            let min = parse_magnitude(caps.get(1), caps.get(2));
            let max = parse_magnitude(caps.get(3), caps.get(4));
            if min.is_some() || max.is_some() {
                tracing::debug!(?min, ?max, "budget range extracted");
                return BudgetRange { min, max };
            }
        }

        if let Some(caps) = self.budget_ceiling.captures(text) {
            let max = parse_magnitude(caps.get(1), caps.get(2));
            if max.is_some() {
                tracing::debug!(?max, "budget ceiling extracted");
                return BudgetRange { min: None, max };
            }
        }

        BudgetRange::default()
    }

    /// Monthly income in BRL
    ///
    /// Prefers an explicit "renda ... <valor>" mention (with an optional
    /// trailing "mil"). An isolated 4+ digit number is accepted only inside
    /// [1.000, 1.000.000] so phone numbers and CEPs are not misread.
    pub fn monthly_income(&self, text: &str) -> Option<f64> {
        if let Some(caps) = self.income.captures(text) {
            if let Some(value) = parse_magnitude(caps.get(1), caps.get(2)) {
                return Some(value);
            }
        }

        let raw = self.income_fallback.captures(text)?.get(1)?.as_str();
        let value: f64 = raw.parse().ok()?;
        if (1_000.0..=1_000_000.0).contains(&value) {
            Some(value)
        } else {
            None
        }
    }

    /// Desired bedroom count ("3 quartos", "2 dormitórios")
    pub fn rooms(&self, text: &str) -> Option<u32> {
        self.rooms
            .captures(text)?
            .get(1)?
            .as_str()
            .parse()
            .ok()
    }

    /// First name from a full name, `None` for blank input
    pub fn preferred_name(&self, full_name: &str) -> Option<String> {
        full_name
            .split_whitespace()
            .next()
            .map(|token| token.to_string())
    }

    /// Run every extractor over one message and collect the update bag
    pub fn extract_all(&self, text: &str) -> LeadUpdate {
        let budget = self.budget(text);
        LeadUpdate {
            cpf: self.cpf(text),
            email: self.email(text),
            orcamento_min: budget.min,
            orcamento_max: budget.max,
            quartos: self.rooms(text),
            renda_mensal: self.monthly_income(text),
            ..LeadUpdate::default()
        }
    }
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a captured magnitude and its optional unit word
fn parse_magnitude(number: Option<regex::Match<'_>>, unit: Option<regex::Match<'_>>) -> Option<f64> {
    let value = normalize_numeric_value(number?.as_str())?;
    let multiplier = match unit {
        Some(u) => {
            let u = u.as_str().to_lowercase();
            if u.starts_with("milh") {
                1_000_000.0
            } else {
                // "mil" or "k"
                1_000.0
            }
        }
        None => 1.0,
    };
    Some(value * multiplier)
}

/// Parse a pt-BR formatted number
///
/// Strips the currency symbol and whitespace, drops `.` thousands
/// separators, converts the `,` decimal separator, then parses. `None` on
/// anything that does not survive.
pub fn normalize_numeric_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .trim_start_matches("r$")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
