use crate::models::{HeaderMapping, Role};
use crate::settings::SynonymTable;

/// Trimmed, BOM-free, lower-cased header text used for synonym lookup.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn role_for(header: &str, synonyms: &SynonymTable) -> Option<Role> {
    Role::ALL.into_iter().find(|role| {
        synonyms
            .for_role(*role)
            .iter()
            .any(|s| normalize_header(s) == header)
    })
}

/// Map raw column headers onto the canonical roles.
///
/// Headers are scanned left to right. Each header is only tried against the
/// first role (product, price, weight) whose synonym set contains it, and an
/// already claimed role is never reassigned, so the leftmost column wins.
pub fn resolve_headers<'a, I>(headers: I, synonyms: &SynonymTable) -> HeaderMapping
where
    I: IntoIterator<Item = &'a str>,
{
    let mut mapping = HeaderMapping::default();
    for raw in headers {
        let Some(role) = role_for(&normalize_header(raw), synonyms) else {
            continue;
        };
        let slot = mapping.slot_mut(role);
        if slot.is_none() {
            *slot = Some(raw.to_string());
        }
    }
    mapping
}
