use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use rand::{Rng, RngCore};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Rgb;
use crate::error::ColorError;
use crate::lexicon::{
    fuzzy_match, words, Emotion, Glyph, Motion, CONNECTIVE_WORDS, SPECIAL_INTENSITY,
    SYMBOL_WORDS,
};
use crate::resonance::{GlyphScores, MoodParticle};

pub const DEFAULT_RHYTHM_WINDOW: usize = 5;

const BASE_INTENSITY: f32 = 0.15;
const MOTION_FLOOR: f32 = 0.1;

pub const COLOR_NEUTRAL: &str = "#A3B6C1";
pub const COLOR_POSITIVE: &str = "#A8E6CF";
pub const COLOR_NEGATIVE: &str = "#FF8B94";
pub const COLOR_POSITIVE_HIGH: &str = "#4ECDC4";
pub const COLOR_NEGATIVE_HIGH: &str = "#FF6B6B";
pub const COLOR_NEUTRAL_HIGH: &str = "#FFE66D";
pub const COLOR_PHASE_SHIFT: &str = "#FFD700";

lazy_static! {
    static ref SENTENCE_SPLIT: Regex = Regex::new(r"[.!?]+").unwrap();
    static ref METAPHOR_RE: Regex =
        Regex::new(r"(?i)(?-u:\b)(?:like|as|is|becomes|transforms)(?-u:\b)").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlutchikScores {
    pub joy: f32,
    pub trust: f32,
    pub fear: f32,
    pub surprise: f32,
    pub sadness: f32,
    pub disgust: f32,
    pub anger: f32,
    pub anticipation: f32,
}

impl PlutchikScores {
    pub fn get(&self, emotion: Emotion) -> f32 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Trust => self.trust,
            Emotion::Fear => self.fear,
            Emotion::Surprise => self.surprise,
            Emotion::Sadness => self.sadness,
            Emotion::Disgust => self.disgust,
            Emotion::Anger => self.anger,
            Emotion::Anticipation => self.anticipation,
        }
    }

    fn slot(&mut self, emotion: Emotion) -> &mut f32 {
        match emotion {
            Emotion::Joy => &mut self.joy,
            Emotion::Trust => &mut self.trust,
            Emotion::Fear => &mut self.fear,
            Emotion::Surprise => &mut self.surprise,
            Emotion::Sadness => &mut self.sadness,
            Emotion::Disgust => &mut self.disgust,
            Emotion::Anger => &mut self.anger,
            Emotion::Anticipation => &mut self.anticipation,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f32)> + '_ {
        Emotion::ALL.into_iter().map(|e| (e, self.get(e)))
    }

    pub fn max(&self) -> f32 {
        self.iter().map(|(_, score)| score).fold(0.0, f32::max)
    }

    fn sum(&self, emotions: &[Emotion]) -> f32 {
        emotions.iter().map(|e| self.get(*e)).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolicMotionScores {
    #[serde(rename = "⟲")]
    pub rhythm: f32,
    #[serde(rename = "∿")]
    pub echo: f32,
    #[serde(rename = "⧫")]
    pub density: f32,
    #[serde(rename = "⟡")]
    pub continuity: f32,
    #[serde(rename = "Ϟ")]
    pub pulse: f32,
}

impl Default for SymbolicMotionScores {
    fn default() -> Self {
        SymbolicMotionScores {
            rhythm: MOTION_FLOOR,
            echo: MOTION_FLOOR,
            density: MOTION_FLOOR,
            continuity: MOTION_FLOOR,
            pulse: MOTION_FLOOR,
        }
    }
}

impl SymbolicMotionScores {
    pub fn get(&self, motion: Motion) -> f32 {
        match motion {
            Motion::Rhythm => self.rhythm,
            Motion::Echo => self.echo,
            Motion::Density => self.density,
            Motion::Continuity => self.continuity,
            Motion::Pulse => self.pulse,
        }
    }

    fn slot(&mut self, motion: Motion) -> &mut f32 {
        match motion {
            Motion::Rhythm => &mut self.rhythm,
            Motion::Echo => &mut self.echo,
            Motion::Density => &mut self.density,
            Motion::Continuity => &mut self.continuity,
            Motion::Pulse => &mut self.pulse,
        }
    }

    pub fn as_vector(&self) -> [f32; 5] {
        [
            self.rhythm,
            self.echo,
            self.density,
            self.continuity,
            self.pulse,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Valence {
    Positive,
    Negative,
    Neutral,
}

impl Valence {
    pub fn as_str(self) -> &'static str {
        match self {
            Valence::Positive => "positive",
            Valence::Negative => "negative",
            Valence::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arousal {
    High,
    Medium,
    Low,
}

impl Arousal {
    pub fn as_str(self) -> &'static str {
        match self {
            Arousal::High => "high",
            Arousal::Medium => "medium",
            Arousal::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalProfile {
    pub token_scores: PlutchikScores,
    pub dominant_cluster: String,
    pub valence: Valence,
    pub arousal: Arousal,
    pub symbolic_motion: SymbolicMotionScores,
    pub phase_shift: bool,
    pub color_hex: String,
    pub explanation: String,
    pub mark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmEntry {
    pub dominant_cluster: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded FIFO of recent dominant clusters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RhythmWindow {
    capacity: usize,
    entries: VecDeque<RhythmEntry>,
}

impl Default for RhythmWindow {
    fn default() -> Self {
        RhythmWindow::with_capacity(DEFAULT_RHYTHM_WINDOW)
    }
}

impl RhythmWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        RhythmWindow {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    /// Records `cluster` and reports whether it differs from the previous entry.
    pub fn observe(&mut self, cluster: &str, at: DateTime<Utc>) -> bool {
        let shifted = self
            .entries
            .back()
            .map(|last| last.dominant_cluster != cluster)
            .unwrap_or(false);
        self.entries.push_back(RhythmEntry {
            dominant_cluster: cluster.to_string(),
            timestamp: at,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        shifted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &RhythmEntry> {
        self.entries.iter()
    }
}

/// Profile reshaped into the basic interpreter's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyResonance {
    pub token: String,
    pub mood: MoodParticle,
    pub glyphs: GlyphScores,
    pub enhanced_profile: EmotionalProfile,
}

/// Plutchik and symbolic-motion scoring with phase-shift memory.
///
/// Calls are order dependent through the rhythm window; one instance must
/// have a single writer.
#[derive(Debug, Clone, Default)]
pub struct EnhancedResonanceInterpreter {
    window: RhythmWindow,
}

impl EnhancedResonanceInterpreter {
    pub fn new() -> Self {
        EnhancedResonanceInterpreter::default()
    }

    pub fn with_window(capacity: usize) -> Self {
        EnhancedResonanceInterpreter {
            window: RhythmWindow::with_capacity(capacity),
        }
    }

    pub fn window(&self) -> &RhythmWindow {
        &self.window
    }

    pub fn analyze_text_emotionally<R: RngCore + ?Sized>(
        &mut self,
        text: &str,
        rng: &mut R,
    ) -> EmotionalProfile {
        let token_scores = score_emotions(text);
        let dominant_cluster = dominant_cluster(&token_scores);
        let valence = valence_of(&token_scores);
        let arousal = arousal_of(&token_scores);
        let symbolic_motion = score_symbolic_motion(text);

        let now = Utc::now();
        let phase_shift = self.window.observe(&dominant_cluster, now);
        if phase_shift {
            debug!(cluster = %dominant_cluster, "rhythm.phase_shift");
        }

        let color_hex = visual_color(valence, arousal, phase_shift).to_string();
        let explanation = explain(valence, arousal, &dominant_cluster, phase_shift);

        EmotionalProfile {
            token_scores,
            dominant_cluster,
            valence,
            arousal,
            symbolic_motion,
            phase_shift,
            color_hex,
            explanation,
            mark: make_mark(now, rng),
        }
    }
}

pub fn convert_to_legacy_format(profile: &EmotionalProfile) -> Result<LegacyResonance, ColorError> {
    let t = &profile.token_scores;
    let m = &profile.symbolic_motion;
    let mut glyphs = GlyphScores::new();
    glyphs.insert(Glyph::Mnemonic, (t.trust + t.sadness) / 2.0);
    glyphs.insert(Glyph::Wave, m.echo);
    glyphs.insert(Glyph::Crystal, (t.sadness + t.fear) / 2.0);
    glyphs.insert(Glyph::Lightning, (t.surprise + t.anger) / 2.0);
    glyphs.insert(Glyph::Infinity, m.rhythm);
    glyphs.insert(Glyph::Balance, (t.trust + t.anticipation) / 2.0);
    glyphs.insert(Glyph::Star, (t.joy + t.surprise) / 2.0);
    glyphs.insert(Glyph::Psi, m.density);
    glyphs.insert(Glyph::Observer, m.continuity);
    glyphs.insert(Glyph::RootStar, (t.anticipation + t.trust) / 2.0);

    let color = Rgb::from_hex(&profile.color_hex)?;
    Ok(LegacyResonance {
        token: "enhanced_analysis".to_string(),
        mood: MoodParticle {
            vector: m.as_vector(),
            amplitude: t.max(),
            color,
            hsl: color.to_hsl(),
        },
        glyphs,
        enhanced_profile: profile.clone(),
    })
}

pub fn score_emotions(text: &str) -> PlutchikScores {
    let mut scores = PlutchikScores::default();
    let exclaimed = text.contains('!');
    let special = SPECIAL_INTENSITY.iter().any(|marker| text.contains(marker));

    for word in words(text) {
        let long_word = word.chars().count() > 8;
        for emotion in Emotion::ALL {
            for keyword in emotion.keywords() {
                if !fuzzy_match(&word, keyword) {
                    continue;
                }
                let mut intensity = BASE_INTENSITY;
                if long_word {
                    intensity += 0.05;
                }
                if exclaimed {
                    intensity += 0.1;
                }
                if special {
                    intensity += 0.2;
                }
                *scores.slot(emotion) += intensity;
            }
        }
    }

    let max = scores.max();
    if max > 0.0 {
        for emotion in Emotion::ALL {
            let slot = scores.slot(emotion);
            *slot = (*slot / max).min(1.0);
        }
    }
    scores
}

pub fn score_symbolic_motion(text: &str) -> SymbolicMotionScores {
    let mut scores = SymbolicMotionScores::default();
    let lowered = text.to_lowercase();

    let lengths: Vec<f32> = SENTENCE_SPLIT
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.chars().count() as f32)
        .collect();
    if lengths.len() > 1 {
        let n = lengths.len() as f32;
        let mean = lengths.iter().sum::<f32>() / n;
        let variance = lengths.iter().map(|len| (len - mean).powi(2)).sum::<f32>() / n;
        scores.rhythm += (1.0 - variance / 1000.0).max(0.0);
    }

    for symbol in SYMBOL_WORDS {
        if lowered.contains(symbol) {
            scores.echo += 0.2;
        }
    }

    scores.density += METAPHOR_RE.find_iter(text).count() as f32 * 0.1;

    for connector in CONNECTIVE_WORDS {
        if lowered.contains(connector) {
            scores.continuity += 0.15;
        }
    }

    if text.contains('!') {
        scores.pulse += 0.2;
    }
    if text.contains('—') {
        scores.pulse += 0.15;
    }
    if text.contains("...") {
        scores.pulse += 0.1;
    }
    if text.to_uppercase() == text && text.chars().count() > 5 {
        scores.pulse += 0.3;
    }

    for word in words(text) {
        for motion in Motion::ALL {
            for keyword in motion.keywords() {
                if fuzzy_match(&word, keyword) {
                    *scores.slot(motion) += 0.1;
                }
            }
        }
    }

    for motion in Motion::ALL {
        let slot = scores.slot(motion);
        *slot = slot.min(1.0);
    }
    scores
}

/// Top two emotions, highest first, joined with ", ". Ties keep table order.
pub fn dominant_cluster(scores: &PlutchikScores) -> String {
    let mut ranked: Vec<(Emotion, f32)> = scores.iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
        .iter()
        .take(2)
        .map(|(emotion, _)| emotion.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn valence_of(scores: &PlutchikScores) -> Valence {
    let positive = scores.sum(&[Emotion::Joy, Emotion::Trust, Emotion::Anticipation]);
    let negative = scores.sum(&[
        Emotion::Fear,
        Emotion::Sadness,
        Emotion::Disgust,
        Emotion::Anger,
    ]);
    if positive > negative {
        Valence::Positive
    } else if negative > positive {
        Valence::Negative
    } else {
        Valence::Neutral
    }
}

pub fn arousal_of(scores: &PlutchikScores) -> Arousal {
    let high = scores.sum(&[Emotion::Anger, Emotion::Fear, Emotion::Surprise, Emotion::Joy]);
    if high > 0.5 {
        Arousal::High
    } else if high > 0.2 {
        Arousal::Medium
    } else {
        Arousal::Low
    }
}

/// Phase-shift gold overrides every valence/arousal colour.
pub fn visual_color(valence: Valence, arousal: Arousal, phase_shift: bool) -> &'static str {
    if phase_shift {
        return COLOR_PHASE_SHIFT;
    }
    match (valence, arousal) {
        (Valence::Positive, Arousal::High) => COLOR_POSITIVE_HIGH,
        (Valence::Negative, Arousal::High) => COLOR_NEGATIVE_HIGH,
        (Valence::Neutral, Arousal::High) => COLOR_NEUTRAL_HIGH,
        (Valence::Positive, _) => COLOR_POSITIVE,
        (Valence::Negative, _) => COLOR_NEGATIVE,
        (Valence::Neutral, _) => COLOR_NEUTRAL,
    }
}

fn explain(valence: Valence, arousal: Arousal, cluster: &str, phase_shift: bool) -> String {
    format!(
        "Emotional field shows {} valence with {} arousal. Dominant emotions: {}{}",
        valence.as_str(),
        arousal.as_str(),
        cluster,
        if phase_shift {
            ". Phase transition detected."
        } else {
            "."
        }
    )
}

fn make_mark<R: RngCore + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let suffix: String = (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("resonance.{}.{}", now.timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn emotion_scores_normalise_to_unit_max() {
        let samples = [
            "I am so happy and full of joy",
            "terror and dread crawl through the dark!",
            "trust me, I believe we will be safe",
            "the quick brown fox",
        ];
        for text in samples {
            let scores = score_emotions(text);
            for (emotion, score) in scores.iter() {
                assert!((0.0..=1.0).contains(&score), "{text}: {emotion}={score}");
            }
            let max = scores.max();
            assert!(max == 1.0 || max == 0.0, "{text}: max={max}");
        }
    }

    #[test]
    fn empty_text_scores_nothing() {
        let scores = score_emotions("");
        assert_eq!(scores, PlutchikScores::default());
        assert_eq!(valence_of(&scores), Valence::Neutral);
        assert_eq!(arousal_of(&scores), Arousal::Low);
        assert_eq!(dominant_cluster(&scores), "joy, trust");
    }

    #[test]
    fn joyful_text_is_positive_and_high() {
        let scores = score_emotions("pure joy and bliss");
        assert_eq!(scores.joy, 1.0);
        assert_eq!(valence_of(&scores), Valence::Positive);
        assert_eq!(arousal_of(&scores), Arousal::High);
        assert!(dominant_cluster(&scores).starts_with("joy"));
    }

    #[test]
    fn intensity_modifiers_survive_normalisation() {
        let plain = score_emotions("confidence sad");
        assert_eq!(plain.trust, 1.0);
        assert!((plain.sadness - 0.75).abs() < 1e-6, "sadness={}", plain.sadness);

        let exclaimed = score_emotions("confidence sad!");
        assert_eq!(exclaimed.trust, 1.0);
        assert!((exclaimed.sadness - 0.25 / 0.3).abs() < 1e-5, "sadness={}", exclaimed.sadness);

        let suffocating = score_emotions("confidence sad suffocate");
        assert!((suffocating.sadness - 0.35 / 0.4).abs() < 1e-5, "sadness={}", suffocating.sadness);
    }

    #[test]
    fn moderate_fear_is_medium_arousal() {
        let scores = score_emotions("confidence confidence fear");
        assert_eq!(scores.trust, 1.0);
        assert!((scores.fear - 0.375).abs() < 1e-6, "fear={}", scores.fear);
        assert_eq!(arousal_of(&scores), Arousal::Medium);
        assert_eq!(valence_of(&scores), Valence::Positive);
    }

    #[test]
    fn valence_and_arousal_serialise_capitalised() {
        assert_eq!(serde_json::to_string(&Valence::Positive).unwrap(), "\"Positive\"");
        assert_eq!(serde_json::to_string(&Arousal::Medium).unwrap(), "\"Medium\"");
        assert_eq!(Valence::Negative.as_str(), "negative");
    }

    #[test]
    fn motion_dimensions_score_exactly() {
        let motion = score_symbolic_motion("the serpent and the vessel — then now...");
        let expected = [0.1, 0.6, 0.1, 0.55, 0.35];
        for (value, want) in motion.as_vector().into_iter().zip(expected) {
            assert!((value - want).abs() < 1e-5, "{:?} != {expected:?}", motion.as_vector());
        }
    }

    #[test]
    fn motion_scores_keep_their_floor() {
        for text in ["", "   ", "plain words here", "AAAAAAAA!!! — ..."] {
            let motion = score_symbolic_motion(text);
            for value in motion.as_vector() {
                assert!((0.1..=1.0).contains(&value), "{text:?}: {value}");
            }
        }
    }

    #[test]
    fn pulse_reacts_to_shouting() {
        let calm = score_symbolic_motion("quiet evening");
        let loud = score_symbolic_motion("STOP THIS NOW!");
        assert!((calm.pulse - 0.1).abs() < 1e-6);
        assert!(loud.pulse > 0.5, "pulse={}", loud.pulse);
    }

    #[test]
    fn even_sentences_raise_rhythm() {
        let motion = score_symbolic_motion("One two three. Four five six. Seven eight nine.");
        assert!(motion.rhythm > 0.9, "rhythm={}", motion.rhythm);
    }

    #[test]
    fn metaphor_markers_count_whole_words_only() {
        let motion = score_symbolic_motion("grass");
        assert!((motion.density - 0.1).abs() < 1e-6);
        let motion = score_symbolic_motion("she is like rivers");
        assert!((motion.density - 0.3).abs() < 1e-5, "density={}", motion.density);
        let motion = score_symbolic_motion("ÉAS as");
        assert!((motion.density - 0.3).abs() < 1e-5, "density={}", motion.density);
    }

    #[test]
    fn first_call_never_shifts_then_cluster_change_does() {
        let mut interpreter = EnhancedResonanceInterpreter::new();
        let mut rng = rng();
        let first = interpreter.analyze_text_emotionally("pure joy and bliss", &mut rng);
        assert!(!first.phase_shift);
        let second = interpreter.analyze_text_emotionally("rage and fury", &mut rng);
        assert_ne!(first.dominant_cluster, second.dominant_cluster);
        assert!(second.phase_shift);
        assert_eq!(second.color_hex, COLOR_PHASE_SHIFT);
        assert!(second.explanation.ends_with("Phase transition detected."));
    }

    #[test]
    fn repeated_cluster_does_not_shift() {
        let mut interpreter = EnhancedResonanceInterpreter::new();
        let mut rng = rng();
        let flags: Vec<bool> = (0..3)
            .map(|_| {
                interpreter
                    .analyze_text_emotionally("pure joy and bliss", &mut rng)
                    .phase_shift
            })
            .collect();
        assert_eq!(flags, vec![false, false, false]);
    }

    #[test]
    fn rhythm_window_is_bounded_fifo() {
        let mut window = RhythmWindow::default();
        let now = Utc::now();
        for idx in 0..7 {
            window.observe(&format!("cluster-{idx}"), now);
            assert!(window.len() <= 5);
        }
        let kept: Vec<&str> = window.iter().map(|e| e.dominant_cluster.as_str()).collect();
        assert_eq!(
            kept,
            vec!["cluster-2", "cluster-3", "cluster-4", "cluster-5", "cluster-6"]
        );
    }

    #[test]
    fn gold_wins_over_arousal_colours() {
        assert_eq!(visual_color(Valence::Neutral, Arousal::High, false), COLOR_NEUTRAL_HIGH);
        assert_eq!(visual_color(Valence::Negative, Arousal::Low, false), COLOR_NEGATIVE);
        for valence in [Valence::Positive, Valence::Negative, Valence::Neutral] {
            for arousal in [Arousal::High, Arousal::Medium, Arousal::Low] {
                assert_eq!(visual_color(valence, arousal, true), COLOR_PHASE_SHIFT);
            }
        }
    }

    #[test]
    fn marks_are_distinct() {
        let mut interpreter = EnhancedResonanceInterpreter::new();
        let mut rng = rng();
        let a = interpreter.analyze_text_emotionally("hope", &mut rng);
        let b = interpreter.analyze_text_emotionally("hope", &mut rng);
        assert!(a.mark.starts_with("resonance."));
        assert_ne!(a.mark, b.mark);
    }

    #[test]
    fn legacy_format_maps_scores_and_colour() {
        let mut interpreter = EnhancedResonanceInterpreter::new();
        let profile = interpreter.analyze_text_emotionally("I trust the sad sea", &mut rng());
        let legacy = convert_to_legacy_format(&profile).unwrap();
        let t = &profile.token_scores;
        assert_eq!(legacy.token, "enhanced_analysis");
        assert_eq!(legacy.glyphs.len(), 10);
        assert!((legacy.glyphs.get(Glyph::Mnemonic) - (t.trust + t.sadness) / 2.0).abs() < 1e-6);
        assert_eq!(legacy.glyphs.get(Glyph::Wave), profile.symbolic_motion.echo);
        assert_eq!(legacy.mood.vector, profile.symbolic_motion.as_vector());
        assert_eq!(legacy.mood.amplitude, t.max());
        assert_eq!(legacy.mood.color.to_hex(), profile.color_hex);
        let back = legacy.mood.hsl.to_rgb().to_hsl();
        assert!((back.h - legacy.mood.hsl.h).abs() <= 1.0);
        assert!((back.s - legacy.mood.hsl.s).abs() <= 1.0);
        assert!((back.l - legacy.mood.hsl.l).abs() <= 1.0);
    }

    #[test]
    fn legacy_format_rejects_bad_hex() {
        let mut interpreter = EnhancedResonanceInterpreter::new();
        let mut profile = interpreter.analyze_text_emotionally("calm", &mut rng());
        profile.color_hex = "#nothex".to_string();
        assert!(convert_to_legacy_format(&profile).is_err());
    }
}
