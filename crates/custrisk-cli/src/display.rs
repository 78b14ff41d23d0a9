//! Vertical card display for staged function definitions.

use custrisk_core::FunctionDefinition;

/// Render a function definition as a vertical card.
pub fn definition_card(def: &FunctionDefinition) -> String {
    let mut out = format!("=== {} ===\n{}\n\n", def.name, def.signature());

    let inputs: Vec<String> = def.input_types.iter().map(|t| t.to_string()).collect();
    let rows: [(&str, String); 6] = [
        ("handler", def.handler.clone()),
        ("input_types", inputs.join(", ")),
        ("return_type", def.return_type.to_string()),
        ("permanent", yes_no(def.permanent).to_string()),
        (
            "stage_location",
            def.stage_location.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("registered_at", def.registered_at.clone()),
    ];
    for (label, value) in rows {
        if value.is_empty() {
            continue;
        }
        out.push_str(&format!("  {:<26} {}\n", label, value));
    }
    out.push('\n');
    out
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_shows_signature_and_fields() {
        let def = FunctionDefinition::customer_risk(
            "customer_risk",
            true,
            Some("@~".to_string()),
            "2026-01-01T00:00:00+00:00".to_string(),
        );
        let card = definition_card(&def);
        assert!(card.starts_with("=== customer_risk ===\n"));
        assert!(card.contains("customer_risk(INTEGER, INTEGER) RETURNS STRING"));
        assert!(card.contains("permanent"));
        assert!(card.contains("yes"));
        assert!(card.contains("@~"));
    }

    #[test]
    fn empty_timestamp_is_skipped() {
        let def = FunctionDefinition::customer_risk("f", false, None, String::new());
        let card = definition_card(&def);
        assert!(!card.contains("registered_at"));
        assert!(card.contains("stage_location"));
    }
}
