use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::{Glyph, COLOR_KEYWORDS};

pub const DEFAULT_TOKEN_RESONANCE: f32 = 0.1;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"\b\w+(?:'\w+)?\b").unwrap();
}

/// One word of input with its accumulated resonance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonantToken {
    pub text: String,
    pub resonance: f32,
    pub glyphs: Vec<Glyph>,
    pub history: Vec<String>,
}

impl ResonantToken {
    pub fn reinforce(&mut self, amount: f32, note: Option<&str>) {
        self.resonance += amount;
        if let Some(note) = note {
            self.history.push(note.to_string());
        }
        debug!(token = %self.text, resonance = self.resonance, "token.reinforced");
    }
}

#[derive(Debug, Clone)]
pub struct TokenFieldScanner {
    lookup: HashMap<String, f32>,
}

impl Default for TokenFieldScanner {
    /// Seeds the lookup with the colour keyword weights.
    fn default() -> Self {
        TokenFieldScanner::with_lookup(
            COLOR_KEYWORDS
                .iter()
                .map(|entry| (entry.keyword.to_string(), entry.weight))
                .collect(),
        )
    }
}

impl TokenFieldScanner {
    pub fn new() -> Self {
        TokenFieldScanner::default()
    }

    /// Keys are matched against lower-cased words.
    pub fn with_lookup(lookup: HashMap<String, f32>) -> Self {
        TokenFieldScanner { lookup }
    }

    pub fn scan(&self, text: &str) -> Vec<ResonantToken> {
        WORD_RE
            .find_iter(text)
            .map(|found| {
                let word = found.as_str();
                let lowered = word.to_lowercase();
                let resonance = self
                    .lookup
                    .get(&lowered)
                    .copied()
                    .unwrap_or(DEFAULT_TOKEN_RESONANCE);
                let glyphs = Glyph::ALL
                    .into_iter()
                    .filter(|glyph| glyph.keywords().iter().any(|kw| *kw == lowered))
                    .collect();
                ResonantToken {
                    text: word.to_string(),
                    resonance,
                    glyphs,
                    history: Vec::new(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanner_keeps_contractions_together() {
        let tokens = TokenFieldScanner::new().scan("Don't let the Ocean go, love.");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Don't", "let", "the", "Ocean", "go", "love"]);
        assert_eq!(tokens[0].resonance, DEFAULT_TOKEN_RESONANCE);
        assert_eq!(tokens[3].resonance, 0.8);
        assert_eq!(tokens[3].glyphs, vec![Glyph::Wave]);
        assert_eq!(tokens[5].resonance, 0.95);
    }

    #[test]
    fn custom_lookup_and_reinforcement() {
        let mut lookup = HashMap::new();
        lookup.insert("spiraling".to_string(), 0.9);
        let scanner = TokenFieldScanner::with_lookup(lookup);
        let mut tokens = scanner.scan("spiraling stillness");
        assert_eq!(tokens[0].resonance, 0.9);
        assert_eq!(tokens[1].resonance, DEFAULT_TOKEN_RESONANCE);

        tokens[1].reinforce(0.25, Some("echoed"));
        tokens[1].reinforce(0.25, None);
        assert!((tokens[1].resonance - 0.6).abs() < 1e-6);
        assert_eq!(tokens[1].history, vec!["echoed".to_string()]);
    }

    #[test]
    fn blank_text_has_no_tokens() {
        assert!(TokenFieldScanner::new().scan("  \t ").is_empty());
    }
}
