//! Aggregated lookup result

use crate::locations::ResolvedLocation;
use crate::news::NewsReport;
use serde::{Deserialize, Serialize};

/// Response payload: parallel lists, one entry per resolved location
///
/// Entries are only added through [`ResultBundle::push`], which keeps the
/// four lists the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBundle {
    dates: Vec<String>,
    locations: Vec<String>,
    commentary: Vec<String>,
    sources: Vec<String>,
}

impl ResultBundle {
    /// Record the news found for one location
    pub fn push(&mut self, location: &ResolvedLocation, report: NewsReport) {
        self.dates.push(report.date);
        self.locations.push(location.name.clone());
        self.commentary.push(report.commentary);
        self.sources.push(report.source);
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn commentary(&self) -> &[String] {
        &self.commentary
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Coordinates;

    fn location(name: &str) -> ResolvedLocation {
        ResolvedLocation {
            name: name.to_string(),
            coordinates: Coordinates {
                latitude: 11.6,
                longitude: 76.1,
            },
        }
    }

    #[test]
    fn test_push_keeps_lists_aligned() {
        let mut bundle = ResultBundle::default();
        assert!(bundle.is_empty());

        bundle.push(
            &location("Wayanad"),
            NewsReport {
                commentary: "Landslides".to_string(),
                date: "2024-07-30".to_string(),
                source: "thehindu.com".to_string(),
            },
        );
        bundle.push(&location("Munnar"), NewsReport::placeholder());

        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.locations(), ["Wayanad", "Munnar"]);
        assert_eq!(bundle.commentary()[1], "Error parsing response");
        assert_eq!(bundle.dates(), ["2024-07-30", ""]);
        assert_eq!(bundle.sources(), ["thehindu.com", ""]);
    }

    #[test]
    fn test_serialized_field_order() {
        let mut bundle = ResultBundle::default();
        bundle.push(&location("Kochi"), NewsReport::placeholder());

        let body = serde_json::to_string(&bundle).unwrap();
        assert_eq!(
            body,
            r#"{"dates":[""],"locations":["Kochi"],"commentary":["Error parsing response"],"sources":[""]}"#
        );
    }
}
