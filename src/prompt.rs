//! System instruction construction.
//!
//! Every request carries the full rate tables so the model quotes real
//! prices instead of guessing.

use crate::tariffs::Region;

/// Format one region's rate table as a flat listing:
/// `0 - 2kg: £30, 2.1 - 4kg: £60, ...`
pub fn grounding_context(region: Region) -> String {
    region
        .tariffs()
        .iter()
        .map(|t| format!("{}: {}", t.weight, region.format_price(t.price)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the system instruction sent with every assistant request.
pub fn system_instruction() -> String {
    let uk = grounding_context(Region::Uk);
    let usa = grounding_context(Region::Usa);

    [
        "You are a helpful, professional AI assistant for P2P Logistics.".to_string(),
        "We ship goods from the UK and USA to Ghana (Accra).".to_string(),
        "Our motto is \"You do the shopping, We do the shipping.\"".to_string(),
        "Key info:".to_string(),
        format!(
            "- We ship from both UK ({}) and USA ({}).",
            Region::Uk.origin(),
            Region::Usa.origin()
        ),
        "- Drop dates occur multiple times a month for both regions.".to_string(),
        "- We provide secure UK or USA warehouse addresses.".to_string(),
        format!("- UK Tariffs (per KG): {}.", uk),
        format!("- USA Tariffs (per LB): {}.", usa),
        "- Packages are consolidated and re-packed for safety.".to_string(),
        "- Be professional and clear. Always differentiate between UK (KG/GBP) and USA (LB/USD) when quoting rates.".to_string(),
    ]
    .join("\n")
}
