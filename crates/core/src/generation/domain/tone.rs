use std::fmt;

use serde::{Deserialize, Serialize};

/// Writing style requested from the article generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Educational,
    Persuasive,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Educational,
        Tone::Persuasive,
    ];

    /// Case-insensitive parse. Unrecognised labels map to `Professional`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "casual" => Tone::Casual,
            "educational" => Tone::Educational,
            "persuasive" => Tone::Persuasive,
            _ => Tone::Professional,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Educational => "educational",
            Tone::Persuasive => "persuasive",
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            Tone::Professional => "Write in a professional, business-appropriate tone.",
            Tone::Casual => "Write in a casual, conversational tone.",
            Tone::Educational => {
                "Write in an informative, educational tone suitable for teaching."
            }
            Tone::Persuasive => {
                "Write in a persuasive, compelling tone that convinces the reader."
            }
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("professional", Tone::Professional)]
    #[case("Casual", Tone::Casual)]
    #[case("  EDUCATIONAL ", Tone::Educational)]
    #[case("persuasive", Tone::Persuasive)]
    #[case("sarcastic", Tone::Professional)]
    #[case("", Tone::Professional)]
    fn test_parse(#[case] label: &str, #[case] expected: Tone) {
        assert_eq!(Tone::parse(label), expected);
    }

    #[test]
    fn test_as_str_round_trips_through_parse() {
        for tone in Tone::ALL {
            assert_eq!(Tone::parse(tone.as_str()), tone);
        }
    }

    #[test]
    fn test_every_tone_has_distinct_instruction() {
        let mut seen = std::collections::HashSet::new();
        for tone in Tone::ALL {
            assert!(seen.insert(tone.instruction()));
        }
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tone::Casual).unwrap(), "\"casual\"");
    }
}
