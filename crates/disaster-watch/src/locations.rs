//! Location list handling

use crate::api::Coordinates;

/// A location the geocoder could place on the map
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub name: String,
    pub coordinates: Coordinates,
}

/// Split the agent's comma-separated answer into trimmed, non-empty names
pub fn split_locations(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove every occurrence of `district` so the geocoder sees the bare place name
///
/// Whitespace runs left behind are collapsed and trailing full stops dropped.
pub fn normalize_location(name: &str) -> String {
    let stripped = name.replace("district", "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_end_matches(['.', ' ']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trims_and_drops_empty() {
        assert_eq!(
            split_locations(" Wayanad ,Munnar,  , Idukki dam,"),
            vec!["Wayanad", "Munnar", "Idukki dam"]
        );
        assert!(split_locations("").is_empty());
        assert_eq!(split_locations("Kochi"), vec!["Kochi"]);
    }

    #[test]
    fn test_normalize_removes_district() {
        assert_eq!(normalize_location("Kerala district"), "Kerala");
        assert_eq!(normalize_location("Wayanad district hospital"), "Wayanad hospital");
        assert_eq!(normalize_location("Munnar"), "Munnar");
    }

    #[test]
    fn test_normalize_removes_district_next_to_punctuation() {
        assert_eq!(normalize_location("Idukki district."), "Idukki");
        assert_eq!(normalize_location("Kozhikode district (Kerala)"), "Kozhikode (Kerala)");

        let hospital = normalize_location("Wayanad district's hospital");
        assert!(!hospital.contains("district"));
        assert_eq!(hospital, "Wayanad 's hospital");
    }

    #[test]
    fn test_normalize_is_case_sensitive_substring() {
        assert_eq!(normalize_location("District Court Kochi"), "District Court Kochi");
        assert_eq!(normalize_location("Lake  districts"), "Lake s");
        assert_eq!(normalize_location("district"), "");
    }
}
