//! Danish broadcast window lookup.
//!
//! Tournaments are played in local daylight, so the Danish airing window
//! depends mostly on which part of the world the course is in. The lookup is
//! an ordered rule table: the lowercase location is tested against each
//! rule's keywords by substring containment and the first rule with any hit
//! wins. Keywords overlap across rules (a US state vs. a country name), so
//! the order of `RULES` is part of the contract.

use crate::event::Broadcast;

/// Viaplay holds the rights to every tour the feed covers.
pub const DEFAULT_CHANNEL: &str = "Viaplay / V Sport Golf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    NorthAmerica,
    MiddleEast,
    AsiaPacific,
    Africa,
    Europe,
}

#[derive(Debug)]
pub struct BroadcastRule {
    pub region: Region,
    /// Lowercase substrings; any one of them selects the rule
    pub keywords: &'static [&'static str],
    pub channel: &'static str,
    pub window: &'static str,
}

impl BroadcastRule {
    fn matches(&self, location_lower: &str) -> bool {
        self.keywords.iter().any(|k| location_lower.contains(k))
    }

    pub fn to_broadcast(&self) -> Broadcast {
        Broadcast {
            channel: self.channel.to_string(),
            window: self.window.to_string(),
        }
    }
}

pub static RULES: &[BroadcastRule] = &[
    BroadcastRule {
        region: Region::NorthAmerica,
        keywords: &[
            "usa",
            "america",
            "florida",
            "california",
            "texas",
            "georgia",
            "new york",
            "pennsylvania",
        ],
        channel: DEFAULT_CHANNEL,
        window: "Torsdag-Søndag: ca. 18:00-02:00",
    },
    BroadcastRule {
        region: Region::MiddleEast,
        keywords: &["dubai", "abu dhabi", "uae", "qatar", "bahrain", "saudi"],
        channel: DEFAULT_CHANNEL,
        window: "Torsdag-Søndag: ca. 08:00-15:00",
    },
    BroadcastRule {
        region: Region::AsiaPacific,
        keywords: &["australia", "singapore", "korea", "japan", "china", "asia"],
        channel: DEFAULT_CHANNEL,
        window: "Torsdag-Søndag: ca. 04:00-12:00",
    },
    BroadcastRule {
        region: Region::Africa,
        keywords: &["south africa", "kenya", "mauritius"],
        channel: DEFAULT_CHANNEL,
        window: "Torsdag-Søndag: ca. 10:00-16:00",
    },
];

/// Used when no rule matches.
pub static DEFAULT_RULE: BroadcastRule = BroadcastRule {
    region: Region::Europe,
    keywords: &[],
    channel: DEFAULT_CHANNEL,
    window: "Torsdag-Søndag: ca. 12:00-20:00",
};

/// The first rule matching `location`, or `DEFAULT_RULE`.
pub fn matching_rule(location: &str) -> &'static BroadcastRule {
    let lower = location.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .unwrap_or(&DEFAULT_RULE)
}

/// Map a free-text location to a channel and airing window. Never fails.
pub fn resolve(location: &str) -> Broadcast {
    matching_rule(location).to_broadcast()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_us_location() {
        let rule = matching_rule("Augusta, Georgia, USA");
        assert_eq!(rule.region, Region::NorthAmerica);
        assert_eq!(
            resolve("Augusta, Georgia, USA").window,
            "Torsdag-Søndag: ca. 18:00-02:00"
        );
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(matching_rule("ABU DHABI").region, Region::MiddleEast);
        assert_eq!(matching_rule("Sentosa, Singapore").region, Region::AsiaPacific);
    }

    #[test]
    fn test_first_match_wins_over_later_rules() {
        // Both "texas" and "japan" match; the North America rule is listed first.
        assert_eq!(matching_rule("Texas vs Japan exhibition").region, Region::NorthAmerica);
        assert_eq!(matching_rule("Sun City, South Africa").region, Region::Africa);
    }

    #[test]
    fn test_substring_match_inside_words() {
        assert_eq!(matching_rule("Riyadh, Saudi Arabia").region, Region::MiddleEast);
        assert_eq!(matching_rule("Pan-Asian Series, Thailand").region, Region::AsiaPacific);
        assert_eq!(matching_rule("Southeast Asia Amata").region, Region::AsiaPacific);
        // "malaysia" ends in "ysia", so no keyword is contained in it.
        assert_eq!(matching_rule("Kuala Lumpur, Malaysia").region, Region::Europe);
    }

    #[test]
    fn test_unknown_location_falls_back_to_europe() {
        let b = resolve("Southport, England");
        assert_eq!(matching_rule("Southport, England").region, Region::Europe);
        assert_eq!(b.channel, DEFAULT_CHANNEL);
        assert_eq!(b.window, "Torsdag-Søndag: ca. 12:00-20:00");
    }

    #[test]
    fn test_empty_location_is_total() {
        assert_eq!(matching_rule("").region, Region::Europe);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        assert_eq!(resolve("Doha, Qatar"), resolve("Doha, Qatar"));
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let regions: Vec<Region> = RULES.iter().map(|r| r.region).collect();
        assert_eq!(
            regions,
            vec![
                Region::NorthAmerica,
                Region::MiddleEast,
                Region::AsiaPacific,
                Region::Africa
            ]
        );
    }
}
