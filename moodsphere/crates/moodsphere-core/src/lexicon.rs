//! Static keyword tables shared by the interpreters.
//!
//! Matching throughout is the loose bidirectional substring rule of
//! [`fuzzy_match`]: a word hits a keyword when either contains the other.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of resonance glyphs, in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Glyph {
    #[serde(rename = "⟐")]
    Mnemonic,
    #[serde(rename = "∿")]
    Wave,
    #[serde(rename = "◊")]
    Crystal,
    #[serde(rename = "⚡")]
    Lightning,
    #[serde(rename = "∞")]
    Infinity,
    #[serde(rename = "☯")]
    Balance,
    #[serde(rename = "✶")]
    Star,
    #[serde(rename = "Ψ")]
    Psi,
    #[serde(rename = "𓂀")]
    Observer,
    #[serde(rename = "⚹")]
    RootStar,
}

impl Glyph {
    pub const ALL: [Glyph; 10] = [
        Glyph::Mnemonic,
        Glyph::Wave,
        Glyph::Crystal,
        Glyph::Lightning,
        Glyph::Infinity,
        Glyph::Balance,
        Glyph::Star,
        Glyph::Psi,
        Glyph::Observer,
        Glyph::RootStar,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Glyph::Mnemonic => "⟐",
            Glyph::Wave => "∿",
            Glyph::Crystal => "◊",
            Glyph::Lightning => "⚡",
            Glyph::Infinity => "∞",
            Glyph::Balance => "☯",
            Glyph::Star => "✶",
            Glyph::Psi => "Ψ",
            Glyph::Observer => "𓂀",
            Glyph::RootStar => "⚹",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Glyph> {
        Glyph::ALL.into_iter().find(|g| g.symbol() == symbol)
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Glyph::Mnemonic => &["memory", "remember", "hold", "listen"],
            Glyph::Wave => &["wave", "flow", "ocean", "water", "current"],
            Glyph::Crystal => &["crystalline", "sorrow", "beautiful", "grief"],
            Glyph::Lightning => &["lightning", "sudden", "flash", "revelation"],
            Glyph::Infinity => &["infinite", "eternal", "forever", "boundless"],
            Glyph::Balance => &["balance", "synthesis", "paradox", "unity"],
            Glyph::Star => &["light", "star", "bright", "illuminate"],
            Glyph::Psi => &["mind", "consciousness", "thought", "awareness"],
            Glyph::Observer => &["watch", "observe", "see", "witness"],
            Glyph::RootStar => &["root", "ground", "stable", "foundation"],
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A weighted colour keyword used by the particle interpreter.
#[derive(Debug, Clone, Copy)]
pub struct ColorKeyword {
    pub keyword: &'static str,
    pub weight: f32,
    pub hue: f32,
    pub saturation: f32,
}

const fn ck(keyword: &'static str, weight: f32, hue: f32, saturation: f32) -> ColorKeyword {
    ColorKeyword {
        keyword,
        weight,
        hue,
        saturation,
    }
}

pub const COLOR_KEYWORDS: [ColorKeyword; 10] = [
    ck("longing", 0.9, 240.0, 70.0),
    ck("ocean", 0.8, 200.0, 80.0),
    ck("remember", 0.85, 260.0, 60.0),
    ck("silence", 0.7, 220.0, 50.0),
    ck("love", 0.95, 340.0, 85.0),
    ck("loss", 0.8, 280.0, 75.0),
    ck("hope", 0.9, 120.0, 70.0),
    ck("fear", 0.75, 30.0, 85.0),
    ck("joy", 0.95, 60.0, 90.0),
    ck("pain", 0.8, 15.0, 80.0),
];

pub const INTENSITY_WORDS: [&str; 5] = ["deeply", "truly", "desperately", "passionately", "gently"];

/// Plutchik's eight primary emotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Trust,
    Fear,
    Surprise,
    Sadness,
    Disgust,
    Anger,
    Anticipation,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Trust,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Sadness,
        Emotion::Disgust,
        Emotion::Anger,
        Emotion::Anticipation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Trust => "trust",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Sadness => "sadness",
            Emotion::Disgust => "disgust",
            Emotion::Anger => "anger",
            Emotion::Anticipation => "anticipation",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Emotion::Joy => &[
                "joy", "happy", "delight", "ecstasy", "bliss", "euphoria", "elated", "cheerful",
            ],
            Emotion::Trust => &[
                "trust",
                "faith",
                "confidence",
                "rely",
                "believe",
                "secure",
                "safe",
                "certain",
            ],
            Emotion::Fear => &[
                "fear", "afraid", "terror", "panic", "anxious", "scared", "dread", "horror",
            ],
            Emotion::Surprise => &[
                "surprise",
                "shock",
                "astonish",
                "amaze",
                "sudden",
                "unexpected",
                "wonder",
            ],
            Emotion::Sadness => &[
                "sad",
                "sorrow",
                "grief",
                "melancholy",
                "despair",
                "mourn",
                "weep",
                "lonely",
            ],
            Emotion::Disgust => &[
                "disgust",
                "revulsion",
                "loathe",
                "abhor",
                "repulse",
                "sick",
                "nauseate",
            ],
            Emotion::Anger => &[
                "anger", "rage", "fury", "wrath", "mad", "irritate", "hate", "venom", "coil",
            ],
            Emotion::Anticipation => &[
                "anticipate",
                "expect",
                "hope",
                "await",
                "prepare",
                "ready",
                "eager",
            ],
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text markers that add a flat bonus to every matched Plutchik keyword.
pub const SPECIAL_INTENSITY: [&str; 2] = ["breathe", "suffocate"];

/// The five symbolic-motion dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Motion {
    #[serde(rename = "⟲")]
    Rhythm,
    #[serde(rename = "∿")]
    Echo,
    #[serde(rename = "⧫")]
    Density,
    #[serde(rename = "⟡")]
    Continuity,
    #[serde(rename = "Ϟ")]
    Pulse,
}

impl Motion {
    pub const ALL: [Motion; 5] = [
        Motion::Rhythm,
        Motion::Echo,
        Motion::Density,
        Motion::Continuity,
        Motion::Pulse,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Motion::Rhythm => "⟲",
            Motion::Echo => "∿",
            Motion::Density => "⧫",
            Motion::Continuity => "⟡",
            Motion::Pulse => "Ϟ",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Motion::Rhythm => &[
                "rhythm", "loop", "cycle", "repeat", "pulse", "flow", "tempo", "cadence", "coil",
            ],
            Motion::Echo => &[
                "symbol",
                "myth",
                "ancient",
                "archetype",
                "serpent",
                "echo",
                "resonate",
                "depth",
            ],
            Motion::Density => &[
                "layer",
                "meaning",
                "metaphor",
                "dense",
                "complex",
                "reference",
                "nested",
                "fractal",
            ],
            Motion::Continuity => &[
                "story",
                "thread",
                "connect",
                "continuity",
                "flow",
                "narrative",
                "coherent",
            ],
            Motion::Pulse => &[
                "charge",
                "intense",
                "energy",
                "pulse",
                "affect",
                "emotional",
                "vivid",
                "power",
            ],
        }
    }
}

pub const SYMBOL_WORDS: [&str; 7] = [
    "serpent", "breath", "sphere", "light", "ancient", "vessel", "membrane",
];

pub const METAPHOR_MARKERS: [&str; 5] = ["like", "as", "is", "becomes", "transforms"];

pub const CONNECTIVE_WORDS: [&str; 6] = ["and", "but", "then", "now", "because", "therefore"];

/// Lower-cases `text` and splits it on whitespace, dropping empty pieces.
pub fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// True when either string contains the other.
///
/// Short words ("me", "i") hit many keywords.
pub fn fuzzy_match(word: &str, keyword: &str) -> bool {
    word.contains(keyword) || keyword.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzzy_match_is_bidirectional() {
        assert!(fuzzy_match("long", "longing"));
        assert!(fuzzy_match("oceans", "ocean"));
        assert!(!fuzzy_match("tide", "ocean"));
    }

    #[test]
    fn words_drop_empty_pieces() {
        assert!(words("   ").is_empty());
        assert_eq!(words("  Ocean\tWAVE "), vec!["ocean", "wave"]);
    }

    #[test]
    fn glyph_symbols_round_trip() {
        for glyph in Glyph::ALL {
            assert_eq!(Glyph::from_symbol(glyph.symbol()), Some(glyph));
        }
        let json = serde_json::to_string(&Glyph::Observer).unwrap();
        assert_eq!(json, "\"𓂀\"");
    }
}
