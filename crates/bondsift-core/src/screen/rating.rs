//! Issuer-name rating heuristic.

use crate::domain::Rating;
use crate::screen::config::ClassifierConfig;

/// Classify an issuer by name keywords.
///
/// Total and pure: lowercased substring containment against the ordered
/// rule list, first match wins, fallback otherwise. Issuers listed under
/// more than one tier resolve to the earliest rule.
pub fn classify(short_name: &str, full_name: &str, config: &ClassifierConfig) -> Rating {
    let short = short_name.to_lowercase();
    let full = full_name.to_lowercase();

    for rule in &config.rules {
        let short_hit = rule
            .short_name_markers
            .iter()
            .any(|marker| short.contains(marker.as_str()));
        let full_hit = rule
            .full_name_markers
            .iter()
            .any(|marker| full.contains(marker.as_str()));

        if short_hit || full_hit {
            return rule.rating;
        }
    }

    config.fallback
}
