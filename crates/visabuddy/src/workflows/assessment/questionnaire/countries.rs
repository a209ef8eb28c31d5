use std::collections::HashMap;
use std::sync::OnceLock;

static COUNTRY_NAME_MAP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

/// Collapse whitespace, strip BOM/zero-width characters, and lowercase so
/// free-text country names from legacy payloads compare reliably.
pub(crate) fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Resolve a free-text country name to its ISO alpha-2 code.
pub(crate) fn code_for_name(name: &str) -> Option<&'static str> {
    country_name_map().get(&normalize_name(name)).copied()
}

/// True when the raw value already looks like an ISO alpha-2 code.
pub(crate) fn is_country_code(value: &str) -> bool {
    value.len() == 2 && value.chars().all(|ch| ch.is_ascii_alphabetic())
}

fn country_name_map() -> &'static HashMap<String, &'static str> {
    COUNTRY_NAME_MAP.get_or_init(|| {
        const NAME_TO_CODE: &[(&str, &str)] = &[
            ("united states", "US"),
            ("united states of america", "US"),
            ("usa", "US"),
            ("america", "US"),
            ("united kingdom", "GB"),
            ("great britain", "GB"),
            ("uk", "GB"),
            ("england", "GB"),
            ("canada", "CA"),
            ("australia", "AU"),
            ("germany", "DE"),
            ("deutschland", "DE"),
            ("france", "FR"),
            ("spain", "ES"),
            ("italy", "IT"),
            ("netherlands", "NL"),
            ("poland", "PL"),
            ("czech republic", "CZ"),
            ("czechia", "CZ"),
            ("portugal", "PT"),
            ("greece", "GR"),
            ("hungary", "HU"),
            ("latvia", "LV"),
            ("lithuania", "LT"),
            ("estonia", "EE"),
            ("japan", "JP"),
            ("south korea", "KR"),
            ("korea", "KR"),
            ("united arab emirates", "AE"),
            ("uae", "AE"),
            ("emirates", "AE"),
            ("turkey", "TR"),
            ("t\u{00fc}rkiye", "TR"),
            ("uzbekistan", "UZ"),
            ("kazakhstan", "KZ"),
            ("kyrgyzstan", "KG"),
            ("tajikistan", "TJ"),
            ("russia", "RU"),
            ("russian federation", "RU"),
        ];

        let mut map = HashMap::with_capacity(NAME_TO_CODE.len());
        for (name, code) in NAME_TO_CODE {
            map.insert(normalize_name(name), *code);
        }
        map
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_common_aliases() {
        assert_eq!(code_for_name("USA"), Some("US"));
        assert_eq!(code_for_name("  United  Kingdom "), Some("GB"));
        assert_eq!(code_for_name("T\u{00fc}rkiye"), Some("TR"));
        assert_eq!(code_for_name("Atlantis"), None);
    }

    #[test]
    fn detects_iso_codes() {
        assert!(is_country_code("US"));
        assert!(is_country_code("de"));
        assert!(!is_country_code("USA"));
        assert!(!is_country_code("U1"));
    }
}
