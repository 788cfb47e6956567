use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::{Hsl, Rgb};
use crate::lexicon::{fuzzy_match, words, Glyph, COLOR_KEYWORDS, INTENSITY_WORDS};

const NEUTRAL_HUE: f32 = 240.0;
const NEUTRAL_SATURATION: f32 = 50.0;
const BASE_AMPLITUDE: f32 = 0.5;
const BASE_RESONANCE: f32 = 0.1;
const WORD_HIT: f32 = 0.2;
const LITERAL_HIT: f32 = 0.15;
const INTENSITY_HIT: f32 = 0.1;
const PROXIMITY_CAP: f32 = 0.5;

/// Colour and intensity derived from a single token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodParticle {
    pub vector: [f32; 5],
    pub amplitude: f32,
    pub color: Rgb,
    pub hsl: Hsl,
}

/// Resonance in `[0, 1]` per glyph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphScores(BTreeMap<Glyph, f32>);

impl GlyphScores {
    pub fn new() -> Self {
        GlyphScores(BTreeMap::new())
    }

    pub fn insert(&mut self, glyph: Glyph, score: f32) {
        self.0.insert(glyph, score);
    }

    pub fn get(&self, glyph: Glyph) -> f32 {
        self.0.get(&glyph).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Glyph, f32)> + '_ {
        self.0.iter().map(|(glyph, score)| (*glyph, *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest scoring glyph; ties go to the earliest glyph in scoring order.
    pub fn dominant(&self) -> Option<(Glyph, f32)> {
        let mut best: Option<(Glyph, f32)> = None;
        for (glyph, score) in self.iter() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((glyph, score)),
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonanceResult {
    pub token: String,
    pub mood: MoodParticle,
    pub glyphs: GlyphScores,
}

/// Keyword-weighted colour and glyph scoring. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResonanceInterpreter;

impl ResonanceInterpreter {
    pub fn new() -> Self {
        ResonanceInterpreter
    }

    pub fn interpret_particle(&self, token: &str) -> MoodParticle {
        let mut total_weight = 0.0f32;
        let mut weighted_hue = 0.0f32;
        let mut weighted_sat = 0.0f32;
        let mut amplitude = BASE_AMPLITUDE;

        for word in words(token) {
            for entry in COLOR_KEYWORDS.iter() {
                if fuzzy_match(&word, entry.keyword) {
                    total_weight += entry.weight;
                    weighted_hue += entry.hue * entry.weight;
                    weighted_sat += entry.saturation * entry.weight;
                    amplitude += entry.weight * 0.1;
                }
            }
        }

        let (hue, saturation) = if total_weight > 0.0 {
            (
                (weighted_hue / total_weight).round(),
                (weighted_sat / total_weight).round().min(100.0),
            )
        } else {
            (NEUTRAL_HUE, NEUTRAL_SATURATION)
        };
        let lightness = (50.0 + amplitude * 30.0).min(80.0);
        let hsl = Hsl::new(hue, saturation, lightness);

        let radians = hue.to_radians();
        MoodParticle {
            vector: [
                radians.sin() * amplitude,
                radians.cos() * amplitude,
                amplitude,
                saturation / 100.0,
                lightness / 100.0,
            ],
            amplitude: amplitude.min(1.0),
            color: hsl.to_rgb(),
            hsl,
        }
    }

    pub fn interpret_token(&self, token: &str) -> GlyphScores {
        let words = words(token);
        let lowered = token.to_lowercase();
        let mut scores = GlyphScores::new();
        for glyph in Glyph::ALL {
            let keywords = glyph.keywords();
            let mut resonance = BASE_RESONANCE;
            for keyword in keywords {
                for word in &words {
                    if fuzzy_match(word, keyword) {
                        resonance += WORD_HIT;
                    }
                }
            }
            resonance += semantic_proximity(&lowered, keywords);
            scores.insert(glyph, resonance.min(1.0));
        }
        scores
    }

    pub fn run_codex_task(&self, token: &str) -> ResonanceResult {
        ResonanceResult {
            token: token.to_string(),
            mood: self.interpret_particle(token),
            glyphs: self.interpret_token(token),
        }
    }
}

fn semantic_proximity(lowered: &str, keywords: &[&str]) -> f32 {
    let literal = keywords
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count() as f32
        * LITERAL_HIT;
    let intensity = INTENSITY_WORDS
        .iter()
        .filter(|word| lowered.contains(*word))
        .count() as f32
        * INTENSITY_HIT;
    (literal + intensity).min(PROXIMITY_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_falls_back_to_neutral_blue() {
        let interpreter = ResonanceInterpreter::new();
        let particle = interpreter.interpret_particle("   ");
        assert_eq!(particle.hsl, Hsl::new(240.0, 50.0, 65.0));
        assert_eq!(particle.amplitude, 0.5);
        assert_eq!(particle.color, Rgb::new(121, 121, 210));
    }

    #[test]
    fn single_keyword_sets_hue_and_lightness() {
        let particle = ResonanceInterpreter::new().interpret_particle("love");
        assert_eq!(particle.hsl.h, 340.0);
        assert_eq!(particle.hsl.s, 85.0);
        assert!((particle.hsl.l - 67.85).abs() < 1e-3, "l={}", particle.hsl.l);
        assert!((particle.amplitude - 0.595).abs() < 1e-5);
        assert!((particle.vector[2] - 0.595).abs() < 1e-5);
    }

    #[test]
    fn amplitude_is_clamped_but_vector_keeps_raw_value() {
        let text = "love joy hope longing love joy hope longing";
        let particle = ResonanceInterpreter::new().interpret_particle(text);
        assert_eq!(particle.amplitude, 1.0);
        assert!(particle.vector[2] > 1.0);
        assert_eq!(particle.hsl.l, 80.0);
    }

    #[test]
    fn ocean_memory_sentence_lifts_both_glyphs() {
        let scores =
            ResonanceInterpreter::new().interpret_token("I long for the ocean to remember me");
        assert!(scores.get(Glyph::Mnemonic) > 0.1);
        assert!(scores.get(Glyph::Wave) > 0.1);
        for (glyph, score) in scores.iter() {
            assert!((0.0..=1.0).contains(&score), "{glyph} out of range: {score}");
        }
        assert_eq!(scores.len(), Glyph::ALL.len());
    }

    #[test]
    fn unrelated_token_keeps_baseline() {
        let scores = ResonanceInterpreter::new().interpret_token("");
        for (_glyph, score) in scores.iter() {
            assert!((score - 0.1).abs() < 1e-6);
        }
        assert_eq!(scores.dominant().map(|(g, _)| g), Some(Glyph::Mnemonic));
    }

    #[test]
    fn proximity_bonus_is_capped() {
        let lowered = "deeply truly desperately passionately gently remember memory hold listen";
        let keywords = Glyph::Mnemonic.keywords();
        assert!((semantic_proximity(lowered, keywords) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn codex_task_composes_particle_and_glyphs() {
        let interpreter = ResonanceInterpreter::new();
        let result = interpreter.run_codex_task("waves of light");
        assert_eq!(result.token, "waves of light");
        assert_eq!(result.mood, interpreter.interpret_particle("waves of light"));
        assert_eq!(result.glyphs, interpreter.interpret_token("waves of light"));
    }
}
