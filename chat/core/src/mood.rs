//! Assistant Moods
//!
//! Every bot message carries a mood that selects which Claim Saathi avatar is
//! drawn next to it. Moods are purely presentational: an unknown tag from the
//! backend never fails a reply, it just falls back to [`Mood::Happy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Claim Saathi's avatar moods
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Default, friendly
    #[default]
    Happy,
    /// Smiling with open mouth
    Excited,
    /// Firm and attentive (also used while typing)
    Neutral,
    /// Shouting
    Angry,
    /// Dancing
    Dancing,
    /// Snapping fingers and winking
    Winking,
    /// Closed fist, puzzled (used for connection failures)
    Confused,
    /// Grinning but grumpy
    Grumpy,
}

impl Mood {
    /// All moods, in declaration order
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Excited,
        Mood::Neutral,
        Mood::Angry,
        Mood::Dancing,
        Mood::Winking,
        Mood::Confused,
        Mood::Grumpy,
    ];

    /// Wire name of this mood
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Excited => "excited",
            Self::Neutral => "neutral",
            Self::Angry => "angry",
            Self::Dancing => "dancing",
            Self::Winking => "winking",
            Self::Confused => "confused",
            Self::Grumpy => "grumpy",
        }
    }

    /// Avatar image for this mood
    #[must_use]
    pub fn image_url(&self) -> &'static str {
        match self {
            Self::Happy => "https://i.ibb.co/JFW8D5KV/claimsaathi-goodmood-happy.png",
            Self::Excited => {
                "https://i.ibb.co/DgLw71WX/claimsaathi-happy-tooexcited-smilingwithopenmouth.png"
            }
            Self::Neutral => "https://i.ibb.co/XZP3h1bN/claimsaathi-neutral-firm.png",
            Self::Angry => "https://i.ibb.co/ZRq6hPFn/claimsaathi-angry-shouting.png",
            Self::Dancing => "https://i.ibb.co/99WsM9fP/claimsaathi-dancing-neutral.png",
            Self::Winking => "https://i.ibb.co/8nHxb4zN/claimsaathi-snapping-winking.png",
            Self::Confused => {
                "https://i.ibb.co/ymBdvNdQ/claimsaathi-closedfist-shouting-confused.png"
            }
            Self::Grumpy => "https://i.ibb.co/xSV49vpx/claimsaathi-grin-grumpy.png",
        }
    }

    /// Resolve an optional backend tag, defaulting to [`Mood::Happy`]
    ///
    /// Tags are matched case-insensitively after trimming.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.and_then(|t| t.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a tag outside the mood set
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood: {0}")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == tag)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_happy() {
        assert_eq!(Mood::default(), Mood::Happy);
    }

    #[test]
    fn test_from_tag_known() {
        assert_eq!(Mood::from_tag(Some("excited")), Mood::Excited);
        assert_eq!(Mood::from_tag(Some(" Grumpy ")), Mood::Grumpy);
    }

    #[test]
    fn test_from_tag_missing_or_unknown_falls_back() {
        assert_eq!(Mood::from_tag(None), Mood::Happy);
        assert_eq!(Mood::from_tag(Some("melancholic")), Mood::Happy);
        assert_eq!(Mood::from_tag(Some("")), Mood::Happy);
    }

    #[test]
    fn test_parse_error_keeps_input() {
        let err = "sleepy".parse::<Mood>().unwrap_err();
        assert_eq!(err, UnknownMood("sleepy".to_string()));
    }

    #[test]
    fn test_every_mood_has_distinct_image() {
        let mut urls: Vec<_> = Mood::ALL.iter().map(Mood::image_url).collect();
        urls.sort_unstable();
        urls.dedup();
        assert_eq!(urls.len(), Mood::ALL.len());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Mood::Confused).unwrap();
        assert_eq!(json, "\"confused\"");
        let mood: Mood = serde_json::from_str("\"winking\"").unwrap();
        assert_eq!(mood, Mood::Winking);
    }
}
