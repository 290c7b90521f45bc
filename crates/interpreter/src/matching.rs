//! Property-to-lead matching
//!
//! Builds the declarative store filter from a lead's stated criteria and
//! scores each returned listing 0..=100. The score is a presentation
//! heuristic, not a ranking guarantee: base 50, price proximity worth up to
//! ±30, rooms up to +15, location up to +15, capped at 100.

use imobi_agent_core::{Lead, PriceFilter, Property, PropertyFilter};

/// True when the lead has all three criteria categories needed for a search:
/// a budget bound, a location, and a room count
pub fn has_enough_data_for_matching(lead: &Lead) -> bool {
    lead.has_budget() && lead.has_location() && lead.has_rooms()
}

/// Build the store filter for a lead's criteria
///
/// Always scoped to active, public, for-sale listings. Bedrooms are a
/// minimum, location is a substring over bairro OR cidade; both are resolved by
/// the store, not here.
pub fn build_property_filter(lead: &Lead) -> PropertyFilter {
    let mut filter = PropertyFilter::for_sale();

    filter.preco = match (lead.orcamento_min, lead.orcamento_max) {
        (Some(min), Some(max)) => Some(PriceFilter::Between { min, max }),
        (None, Some(max)) => Some(PriceFilter::AtMost { max }),
        (Some(min), None) => Some(PriceFilter::AtLeast { min }),
        (None, None) => None,
    };

    if let Some(quartos) = lead.quartos {
        filter.dormitorios_min = Some(quartos);
    }
    if lead.has_location() {
        filter.localizacao = lead.localizacao.clone();
    }
    if let Some(company_id) = &lead.company_id {
        filter.company_id = Some(company_id.clone());
    }

    filter
}

/// Score how well a listing fits the lead's criteria, 0..=100
pub fn match_score(property: &Property, lead: &Lead) -> f64 {
    let mut score = 50.0;

    // Price proximity, only when the lead gave a full range. Linear in the
    // distance from the range midpoint, worth +30 at the midpoint and
    // bottoming out at -30 one full range-width away.
    if let (Some(min), Some(max), Some(price)) =
        (lead.orcamento_min, lead.orcamento_max, property.valor_venda)
    {
        let mid = (min + max) / 2.0;
        let half_range = (max - min) / 2.0;
        let term = if half_range > 0.0 {
            let ratio = (price - mid).abs() / half_range;
            30.0 - (ratio * 30.0).min(60.0)
        } else {
            // Zero-width range: exact-price target. Deviation is measured
            // relative to the target, saturating at 50% off.
            let deviation = (price - mid).abs() / mid.max(1.0);
            30.0 - (deviation * 120.0).min(60.0)
        };
        score += term;
    }

    // Rooms: meeting the request is worth 10, hitting it exactly 5 more
    if let (Some(available), Some(wanted)) = (property.dormitorios, lead.quartos) {
        if available >= wanted {
            score += 10.0;
            if available == wanted {
                score += 5.0;
            }
        }
    }

    // Location: neighborhood match beats city match
    if let Some(wanted) = lead.localizacao.as_deref().filter(|l| !l.trim().is_empty()) {
        let wanted = wanted.to_lowercase();
        let in_bairro = property
            .bairro
            .as_deref()
            .map(|b| b.to_lowercase().contains(&wanted))
            .unwrap_or(false);
        let in_cidade = property
            .cidade
            .as_deref()
            .map(|c| c.to_lowercase().contains(&wanted))
            .unwrap_or(false);

        if in_bairro {
            score += 15.0;
        } else if in_cidade {
            score += 10.0;
        }
    }

    score.min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qualified_lead() -> Lead {
        Lead::new()
            .orcamento(Some(400_000.0), Some(600_000.0))
            .localizacao("Centro")
            .quartos(2)
    }

    #[test]
    fn test_enough_data_requires_all_three_categories() {
        assert!(has_enough_data_for_matching(&qualified_lead()));

        // One budget bound is enough for the budget category
        let lead = Lead::new()
            .orcamento(None, Some(500_000.0))
            .localizacao("Moema")
            .quartos(1);
        assert!(has_enough_data_for_matching(&lead));

        let missing_rooms = Lead::new()
            .orcamento(Some(100_000.0), None)
            .localizacao("Centro");
        assert!(!has_enough_data_for_matching(&missing_rooms));

        assert!(!has_enough_data_for_matching(&Lead::new()));
    }

    #[test]
    fn test_filter_from_full_range() {
        let filter = build_property_filter(&qualified_lead());

        assert!(filter.ativo && filter.publico && filter.finalidade_venda);
        assert_eq!(
            filter.preco,
            Some(PriceFilter::Between {
                min: 400_000.0,
                max: 600_000.0
            })
        );
        assert_eq!(filter.dormitorios_min, Some(2));
        assert_eq!(filter.localizacao.as_deref(), Some("Centro"));
    }

    #[test]
    fn test_filter_from_ceiling_only() {
        let lead = Lead::new().orcamento(None, Some(350_000.0));
        let filter = build_property_filter(&lead);
        assert_eq!(filter.preco, Some(PriceFilter::AtMost { max: 350_000.0 }));
        assert_eq!(filter.dormitorios_min, None);
        assert_eq!(filter.localizacao, None);
    }

    #[test]
    fn test_perfect_match_clamps_to_100() {
        // 50 base + 30 price (exact midpoint) + 10 rooms + 5 exact
        // + 15 neighborhood = 110, clamped
        let property = Property::new()
            .valor_venda(500_000.0)
            .dormitorios(2)
            .bairro("Centro")
            .cidade("São Paulo");

        assert_eq!(match_score(&property, &qualified_lead()), 100.0);
    }

    #[test]
    fn test_price_term_linear_falloff() {
        let lead = Lead::new().orcamento(Some(400_000.0), Some(600_000.0));

        // At the midpoint: 50 + 30
        let at_mid = Property::new().valor_venda(500_000.0);
        assert_eq!(match_score(&at_mid, &lead), 80.0);

        // At a bound: distance equals the half-range, term is 0
        let at_bound = Property::new().valor_venda(600_000.0);
        assert_eq!(match_score(&at_bound, &lead), 50.0);

        // A full range-width beyond the midpoint: term saturates at -30
        let far = Property::new().valor_venda(900_000.0);
        assert_eq!(match_score(&far, &lead), 20.0);
    }

    #[test]
    fn test_price_term_needs_both_bounds() {
        let lead = Lead::new().orcamento(None, Some(500_000.0));
        let property = Property::new().valor_venda(500_000.0);
        assert_eq!(match_score(&property, &lead), 50.0);
    }

    #[test]
    fn test_zero_width_range_is_exact_target() {
        let lead = Lead::new().orcamento(Some(500_000.0), Some(500_000.0));

        let exact = Property::new().valor_venda(500_000.0);
        assert_eq!(match_score(&exact, &lead), 80.0);

        // 50% off the target saturates the penalty; no NaN, no panic
        let off = Property::new().valor_venda(250_000.0);
        assert_eq!(match_score(&off, &lead), 20.0);
    }

    #[test]
    fn test_room_bonuses() {
        let lead = Lead::new().quartos(2);

        let exact = Property::new().dormitorios(2);
        assert_eq!(match_score(&exact, &lead), 65.0);

        let more = Property::new().dormitorios(3);
        assert_eq!(match_score(&more, &lead), 60.0);

        let fewer = Property::new().dormitorios(1);
        assert_eq!(match_score(&fewer, &lead), 50.0);
    }

    #[test]
    fn test_location_neighborhood_beats_city() {
        let lead = Lead::new().localizacao("centro");

        let bairro = Property::new().bairro("Centro Histórico").cidade("Curitiba");
        assert_eq!(match_score(&bairro, &lead), 65.0);

        let cidade_only = Property::new().bairro("Batel").cidade("Centro Novo");
        assert_eq!(match_score(&cidade_only, &lead), 60.0);

        let neither = Property::new().bairro("Batel").cidade("Curitiba");
        assert_eq!(match_score(&neither, &lead), 50.0);
    }
}
