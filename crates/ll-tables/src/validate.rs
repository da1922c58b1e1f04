use ll_core::{ComponentMap, DivisionTable, LlError, Result};
use std::collections::BTreeMap;

/// Example characters listed per undefined component.
const MAX_EXAMPLES: usize = 3;

/// Check that every component used by `table` has a code in `mappings`.
///
/// On failure the error lists each undefined component, sorted, with up to
/// three characters that use it.
pub fn validate_division_components(table: &DivisionTable, mappings: &ComponentMap) -> Result<()> {
    let mut undefined: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (character, divisions) in table {
        for division in divisions {
            for component in &division.components {
                if !mappings.contains_key(component) {
                    undefined.entry(component.as_str()).or_default().push(character.as_str());
                }
            }
        }
    }
    if undefined.is_empty() {
        return Ok(());
    }

    let detail = undefined
        .iter_mut()
        .map(|(component, chars)| {
            chars.sort_unstable();
            chars.dedup();
            let shown = &chars[..chars.len().min(MAX_EXAMPLES)];
            let more = if chars.len() > MAX_EXAMPLES { ", ..." } else { "" };
            format!("  {component} (used by {}{more})", shown.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n");
    Err(LlError::UndefinedComponents {
        count: undefined.len(),
        detail,
    })
}
