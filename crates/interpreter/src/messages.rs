//! pt-BR message templates
//!
//! String construction only, no decisions are made here. Everything the
//! templates need arrives as arguments; the hour of day is an input so the
//! core stays clock-free.

use imobi_agent_core::{Lead, Message, Property};

/// Format a BRL amount the pt-BR way ("R$ 350.000,00")
///
/// Zero and negative amounts render as "Sob consulta"; listings without a
/// public price are shown that way.
pub fn format_currency(value: f64) -> String {
    if value <= 0.0 || !value.is_finite() {
        return "Sob consulta".to_string();
    }

    let cents = (value * 100.0).round() as i64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("R$ {},{:02}", grouped, frac)
}

/// Greeting for the hour of day (0..=23); boundaries at 6, 12 and 18
pub fn time_greeting(hour: u32) -> &'static str {
    match hour {
        6..=11 => "Bom dia",
        12..=17 => "Boa tarde",
        _ => "Boa noite",
    }
}

/// Parse a listing's highlights field into at most three items
///
/// The field is free-form in the store: a JSON array when the listing came
/// through the import job, a comma list when typed by an agent, otherwise
/// arbitrary description text, in which case the first non-blank lines are
/// used.
pub fn property_highlights(raw: &str) -> Vec<String> {
    if let Ok(items) = serde_json::from_str::<Vec<String>>(raw) {
        return items
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .take(3)
            .collect();
    }

    let by_comma: Vec<String> = raw
        .split(',')
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    if by_comma.len() > 1 {
        return by_comma.into_iter().take(3).collect();
    }

    raw.lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .take(3)
        .collect()
}

/// One-property preview block for WhatsApp
pub fn property_preview(property: &Property) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "🏠 *{}*",
        property.titulo.as_deref().unwrap_or("Imóvel disponível")
    ));

    let place = match (property.bairro.as_deref(), property.cidade.as_deref()) {
        (Some(bairro), Some(cidade)) => Some(format!("{}, {}", bairro, cidade)),
        (Some(bairro), None) => Some(bairro.to_string()),
        (None, Some(cidade)) => Some(cidade.to_string()),
        (None, None) => None,
    };
    if let Some(place) = place {
        lines.push(format!("📍 {}", place));
    }

    if let Some(dormitorios) = property.dormitorios {
        let mut rooms = format!("🛏 {} quarto(s)", dormitorios);
        if let Some(suites) = property.suites.filter(|&s| s > 0) {
            rooms.push_str(&format!(", {} suíte(s)", suites));
        }
        lines.push(rooms);
    }

    lines.push(format!(
        "💰 {}",
        format_currency(property.valor_venda.unwrap_or(0.0))
    ));

    if let Some(destaques) = property.destaques.as_deref() {
        for item in property_highlights(destaques) {
            lines.push(format!("✨ {}", item));
        }
    }

    lines.join("\n")
}

/// Opening message when the lead arrives with no property context
pub fn generic_welcome(hour: u32, name: Option<&str>) -> String {
    let greeting = match name {
        Some(name) => format!("{}, {}!", time_greeting(hour), name),
        None => format!("{}!", time_greeting(hour)),
    };

    format!(
        "{} 👋 Sou o assistente virtual da imobiliária. Vou te ajudar a \
         encontrar o imóvel ideal.\n\nPara começar: qual região você procura, \
         quantos quartos precisa e qual o seu orçamento?",
        greeting
    )
}

/// Opening message when the lead arrived through a listing link
pub fn property_welcome(hour: u32, name: Option<&str>, property: &Property) -> String {
    let greeting = match name {
        Some(name) => format!("{}, {}!", time_greeting(hour), name),
        None => format!("{}!", time_greeting(hour)),
    };

    format!(
        "{} 👋 Vi que você se interessou por este imóvel:\n\n{}\n\nQuer mais \
         detalhes ou prefere já agendar uma visita?",
        greeting,
        property_preview(property)
    )
}

/// Sent when the portfolio search came back empty
pub fn no_match_message(lead: &Lead) -> String {
    let mut criteria = Vec::new();
    if let Some(localizacao) = lead.localizacao.as_deref().filter(|l| !l.trim().is_empty()) {
        criteria.push(format!("região: {}", localizacao));
    }
    if let Some(quartos) = lead.quartos {
        criteria.push(format!("{} quarto(s)", quartos));
    }
    if let Some(max) = lead.orcamento_max {
        criteria.push(format!("até {}", format_currency(max)));
    } else if let Some(min) = lead.orcamento_min {
        criteria.push(format!("a partir de {}", format_currency(min)));
    }

    let resumo = if criteria.is_empty() {
        String::new()
    } else {
        format!(" ({})", criteria.join(", "))
    };

    format!(
        "Ainda não encontrei imóveis que combinem com o que você procura{}. \
         Posso buscar com critérios diferentes: outra região, outra faixa de \
         valor ou outro tamanho. Quer tentar?",
        resumo
    )
}

/// Render a conversation for the reply model
///
/// One line per turn, transcription preferred over raw content for audio
/// messages.
pub fn conversation_history(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.direction.speaker_label(), m.effective_text()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use imobi_agent_core::MessageDirection;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(350_000.0), "R$ 350.000,00");
        assert_eq!(format_currency(1_250_000.5), "R$ 1.250.000,50");
        assert_eq!(format_currency(999.0), "R$ 999,00");
        assert_eq!(format_currency(0.0), "Sob consulta");
        assert_eq!(format_currency(-10.0), "Sob consulta");
    }

    #[test]
    fn test_time_greeting_boundaries() {
        assert_eq!(time_greeting(6), "Bom dia");
        assert_eq!(time_greeting(11), "Bom dia");
        assert_eq!(time_greeting(12), "Boa tarde");
        assert_eq!(time_greeting(17), "Boa tarde");
        assert_eq!(time_greeting(18), "Boa noite");
        assert_eq!(time_greeting(23), "Boa noite");
        assert_eq!(time_greeting(0), "Boa noite");
        assert_eq!(time_greeting(5), "Boa noite");
    }

    #[test]
    fn test_highlights_json_array() {
        let raw = r#"["Piscina", "Academia", "Portaria 24h", "Salão de festas"]"#;
        assert_eq!(
            property_highlights(raw),
            vec!["Piscina", "Academia", "Portaria 24h"]
        );
    }

    #[test]
    fn test_highlights_comma_list() {
        assert_eq!(
            property_highlights("varanda gourmet, 2 vagas, lazer completo, pet friendly"),
            vec!["varanda gourmet", "2 vagas", "lazer completo"]
        );
    }

    #[test]
    fn test_highlights_free_text_lines() {
        let raw = "Apartamento reformado\n\nVista livre\nAndar alto\nSol da manhã";
        assert_eq!(
            property_highlights(raw),
            vec!["Apartamento reformado", "Vista livre", "Andar alto"]
        );
    }

    #[test]
    fn test_property_preview() {
        let property = Property::new()
            .titulo("Apartamento 2 quartos no Centro")
            .valor_venda(450_000.0)
            .dormitorios(2)
            .bairro("Centro")
            .cidade("Curitiba");

        let preview = property_preview(&property);
        assert!(preview.contains("Apartamento 2 quartos no Centro"));
        assert!(preview.contains("Centro, Curitiba"));
        assert!(preview.contains("R$ 450.000,00"));
    }

    #[test]
    fn test_preview_without_price_shows_sob_consulta() {
        let property = Property::new().titulo("Cobertura");
        assert!(property_preview(&property).contains("Sob consulta"));
    }

    #[test]
    fn test_welcome_messages() {
        let msg = generic_welcome(9, Some("Maria"));
        assert!(msg.starts_with("Bom dia, Maria!"));
        assert!(msg.contains("orçamento"));

        let msg = generic_welcome(20, None);
        assert!(msg.starts_with("Boa noite!"));
    }

    #[test]
    fn test_property_welcome_embeds_preview() {
        let property = Property::new()
            .titulo("Casa com quintal")
            .valor_venda(380_000.0);

        let msg = property_welcome(14, Some("Carlos"), &property);
        assert!(msg.starts_with("Boa tarde, Carlos!"));
        assert!(msg.contains("Casa com quintal"));
        assert!(msg.contains("R$ 380.000,00"));
        assert!(msg.contains("agendar uma visita"));
    }

    #[test]
    fn test_no_match_lists_criteria() {
        let lead = Lead::new()
            .localizacao("Moema")
            .quartos(3)
            .orcamento(None, Some(600_000.0));

        let msg = no_match_message(&lead);
        assert!(msg.contains("região: Moema"));
        assert!(msg.contains("3 quarto(s)"));
        assert!(msg.contains("R$ 600.000,00"));
    }

    #[test]
    fn test_conversation_history_rendering() {
        let messages = vec![
            Message::incoming("oi, procuro apartamento"),
            Message::outgoing("Bom dia! Qual região?"),
            Message::new(MessageDirection::Incoming, "")
                .with_transcription("no Centro, dois quartos"),
        ];

        let history = conversation_history(&messages);
        assert_eq!(
            history,
            "Cliente: oi, procuro apartamento\n\
             Atendente: Bom dia! Qual região?\n\
             Cliente: no Centro, dois quartos"
        );
    }
}
