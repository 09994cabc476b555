//! Weather phenomenon classification
//!
//! The observation feed reports phenomena as free text ("Light snow shower",
//! "Moderate rain", "Thunderstorm"...). Fee rules only care about a handful
//! of categories, so the text is normalized and matched against the
//! canonical phenomena registered for each category.

/// Category a weather phenomenon falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhenomenonCategory {
    Snow,
    Sleet,
    Rain,
    Forbidden,
    Normal,
}

const SNOW: &[&str] = &[
    "light snow shower",
    "moderate snow shower",
    "heavy snow shower",
    "light snowfall",
    "moderate snowfall",
    "heavy snowfall",
];

const SLEET: &[&str] = &["light sleet", "moderate sleet"];

const RAIN: &[&str] = &[
    "light shower",
    "moderate shower",
    "heavy shower",
    "light rain",
    "moderate rain",
    "heavy rain",
];

const FORBIDDEN: &[&str] = &["glaze", "hail", "thunder", "thunderstorm"];

const NORMAL: &[&str] = &[
    "clear",
    "few clouds",
    "variable clouds",
    "cloudy with clear spells",
    "overcast",
    "mist",
    "fog",
];

/// Order of the partial-match fallback. Hazardous categories come first so
/// that a weaker match never masks them.
const PARTIAL_MATCH_PRIORITY: [PhenomenonCategory; 4] = [
    PhenomenonCategory::Forbidden,
    PhenomenonCategory::Snow,
    PhenomenonCategory::Sleet,
    PhenomenonCategory::Rain,
];

impl PhenomenonCategory {
    pub const ALL: [PhenomenonCategory; 5] = [
        PhenomenonCategory::Snow,
        PhenomenonCategory::Sleet,
        PhenomenonCategory::Rain,
        PhenomenonCategory::Forbidden,
        PhenomenonCategory::Normal,
    ];

    /// Canonical (already normalized) phenomena of this category
    pub fn phenomena(&self) -> &'static [&'static str] {
        match self {
            Self::Snow => SNOW,
            Self::Sleet => SLEET,
            Self::Rain => RAIN,
            Self::Forbidden => FORBIDDEN,
            Self::Normal => NORMAL,
        }
    }

    /// Classify free phenomenon text. Never fails: absent, blank or
    /// unrecognised text is `Normal`.
    pub fn classify(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return Self::Normal;
        };
        if text.trim().is_empty() {
            return Self::Normal;
        }

        let normalized = normalize(text);

        if let Some(category) = Self::ALL
            .into_iter()
            .find(|category| category.phenomena().contains(&normalized.as_str()))
        {
            return category;
        }

        PARTIAL_MATCH_PRIORITY
            .into_iter()
            .find(|category| {
                category
                    .phenomena()
                    .iter()
                    .any(|phenomenon| normalized.contains(phenomenon))
            })
            .unwrap_or(Self::Normal)
    }

    pub fn is_usage_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden)
    }
}

impl std::fmt::Display for PhenomenonCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snow => write!(f, "Snow"),
            Self::Sleet => write!(f, "Sleet"),
            Self::Rain => write!(f, "Rain"),
            Self::Forbidden => write!(f, "Forbidden"),
            Self::Normal => write!(f, "Normal"),
        }
    }
}

/// Lower-case, collapse whitespace runs, then turn hyphens into spaces.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('-', " ")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn absent_or_blank_is_normal() {
        assert_eq!(PhenomenonCategory::classify(None), PhenomenonCategory::Normal);
        assert_eq!(PhenomenonCategory::classify(Some("")), PhenomenonCategory::Normal);
        assert_eq!(PhenomenonCategory::classify(Some("   \t")), PhenomenonCategory::Normal);
    }

    #[test]
    fn every_canonical_string_classifies_to_its_category() {
        for category in PhenomenonCategory::ALL {
            for phenomenon in category.phenomena() {
                assert_eq!(
                    PhenomenonCategory::classify(Some(phenomenon)),
                    category,
                    "{phenomenon}"
                );
            }
        }
    }

    #[test]
    fn canonical_sets_are_disjoint() {
        let mut seen = HashSet::new();
        for category in PhenomenonCategory::ALL {
            for phenomenon in category.phenomena() {
                assert!(seen.insert(*phenomenon), "duplicate: {phenomenon}");
            }
        }
    }

    #[test]
    fn feed_casing_and_spacing_is_normalized() {
        assert_eq!(
            PhenomenonCategory::classify(Some("Light  Snow\tShower")),
            PhenomenonCategory::Snow
        );
        assert_eq!(
            PhenomenonCategory::classify(Some("  Moderate sleet ")),
            PhenomenonCategory::Sleet
        );
        assert_eq!(PhenomenonCategory::classify(Some("Few clouds")), PhenomenonCategory::Normal);
    }

    #[test]
    fn hyphens_are_treated_as_spaces() {
        assert_eq!(
            PhenomenonCategory::classify(Some("heavy-rain")),
            PhenomenonCategory::Rain
        );
    }

    #[test]
    fn partial_match_picks_up_qualified_phenomena() {
        assert_eq!(
            PhenomenonCategory::classify(Some("Heavy rain showers")),
            PhenomenonCategory::Rain
        );
        assert_eq!(
            PhenomenonCategory::classify(Some("Thunderstorm with heavy rain")),
            PhenomenonCategory::Forbidden
        );
    }

    #[test]
    fn partial_match_prefers_forbidden_then_snow() {
        assert_eq!(
            PhenomenonCategory::classify(Some("light rain and hail")),
            PhenomenonCategory::Forbidden
        );
        assert_eq!(
            PhenomenonCategory::classify(Some("light rain turning into heavy snowfall")),
            PhenomenonCategory::Snow
        );
    }

    #[test]
    fn unknown_text_is_normal() {
        assert_eq!(PhenomenonCategory::classify(Some("Unknown")), PhenomenonCategory::Normal);
        assert_eq!(PhenomenonCategory::classify(Some("drizzle")), PhenomenonCategory::Normal);
    }

    #[test]
    fn only_forbidden_forbids_usage() {
        for category in PhenomenonCategory::ALL {
            assert_eq!(
                category.is_usage_forbidden(),
                category == PhenomenonCategory::Forbidden
            );
        }
    }
}
