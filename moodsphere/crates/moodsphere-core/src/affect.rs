//! Quick keyword classifiers that map free text straight to a display colour.
//!
//! Neither classifier feeds the resonance or phase scoring; they drive the
//! ambient colour only.

use std::collections::HashMap;

use lazy_static::lazy_static;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::color::Hsl;
use crate::lexicon::words;

pub const NEUTRAL_HSL: Hsl = Hsl::new(240.0, 30.0, 50.0);

const SPOKEN: [(&str, &[&str], Hsl); 6] = [
    (
        "happy",
        &["happy", "joy", "excited", "wonderful", "amazing", "love", "great"],
        Hsl::new(60.0, 80.0, 60.0),
    ),
    (
        "sad",
        &["sad", "down", "disappointed", "hurt", "lonely", "depressed"],
        Hsl::new(220.0, 60.0, 40.0),
    ),
    (
        "angry",
        &["angry", "frustrated", "mad", "irritated", "annoyed"],
        Hsl::new(0.0, 80.0, 50.0),
    ),
    (
        "calm",
        &["peaceful", "calm", "relaxed", "serene", "content", "zen"],
        Hsl::new(120.0, 50.0, 50.0),
    ),
    (
        "anxious",
        &["anxious", "worried", "nervous", "stressed", "overwhelmed"],
        Hsl::new(30.0, 70.0, 45.0),
    ),
    (
        "energetic",
        &["energetic", "pumped", "motivated", "driven", "inspired"],
        Hsl::new(300.0, 70.0, 60.0),
    ),
];

const SEMANTIC_TABLE: &[(&str, f32)] = &[
    ("ache", 8.0),
    ("rage", 9.0),
    ("ecstasy", 9.0),
    ("despair", 8.0),
    ("bliss", 9.0),
    ("torment", 8.0),
    ("euphoria", 9.0),
    ("agony", 8.0),
    ("rapture", 9.0),
    ("breathe", 6.0),
    ("longing", 7.0),
    ("yearning", 7.0),
    ("hope", 6.0),
    ("fear", 7.0),
    ("joy", 6.0),
    ("sorrow", 6.0),
    ("anxiety", 7.0),
    ("peace", 6.0),
    ("love", 7.0),
    ("drift", 5.0),
    ("flow", 5.0),
    ("tension", 6.0),
    ("release", 6.0),
    ("wonder", 5.0),
    ("calm", 4.0),
    ("still", 4.0),
    ("quiet", 3.0),
    ("gentle", 4.0),
    ("soft", 3.0),
    ("deep", 5.0),
    ("vast", 5.0),
    ("infinite", 6.0),
    ("becoming", 5.0),
    ("return", 5.0),
    ("transform", 6.0),
    ("shift", 4.0),
    ("emerge", 5.0),
    ("dissolve", 5.0),
    ("awaken", 6.0),
    ("divine", 7.0),
    ("sacred", 6.0),
    ("holy", 6.0),
    ("transcendent", 8.0),
    ("eternal", 7.0),
    ("cosmos", 6.0),
    ("soul", 7.0),
    ("spirit", 6.0),
];

lazy_static! {
    static ref SEMANTIC_WEIGHTS: HashMap<&'static str, f32> =
        SEMANTIC_TABLE.iter().copied().collect();
}

/// Substring probes tried in order once a word is too light for the
/// transcendent and mystical buckets.
const PROBES: [(&[&str], SemanticMood); 7] = [
    (&["peace", "calm"], SemanticMood::Peaceful),
    (&["joy", "light"], SemanticMood::Joyful),
    (&["rage", "fire"], SemanticMood::Passionate),
    (&["sorrow", "dark"], SemanticMood::Melancholic),
    (&["anxious", "worry"], SemanticMood::Anxious),
    (&["think", "wonder"], SemanticMood::Contemplative),
    (&["energy", "alive"], SemanticMood::Energetic),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticMood {
    Transcendent,
    Mystical,
    Peaceful,
    Joyful,
    Passionate,
    Melancholic,
    Anxious,
    Contemplative,
    Energetic,
    Neutral,
}

impl SemanticMood {
    pub fn as_str(self) -> &'static str {
        match self {
            SemanticMood::Transcendent => "transcendent",
            SemanticMood::Mystical => "mystical",
            SemanticMood::Peaceful => "peaceful",
            SemanticMood::Joyful => "joyful",
            SemanticMood::Passionate => "passionate",
            SemanticMood::Melancholic => "melancholic",
            SemanticMood::Anxious => "anxious",
            SemanticMood::Contemplative => "contemplative",
            SemanticMood::Energetic => "energetic",
            SemanticMood::Neutral => "neutral",
        }
    }

    pub fn hsl(self) -> Hsl {
        match self {
            SemanticMood::Transcendent => Hsl::new(270.0, 80.0, 60.0),
            SemanticMood::Mystical => Hsl::new(240.0, 70.0, 50.0),
            SemanticMood::Peaceful => Hsl::new(180.0, 50.0, 60.0),
            SemanticMood::Joyful => Hsl::new(60.0, 80.0, 70.0),
            SemanticMood::Passionate => Hsl::new(0.0, 90.0, 50.0),
            SemanticMood::Melancholic => Hsl::new(220.0, 60.0, 40.0),
            SemanticMood::Anxious => Hsl::new(45.0, 80.0, 45.0),
            SemanticMood::Contemplative => Hsl::new(200.0, 40.0, 50.0),
            SemanticMood::Energetic => Hsl::new(120.0, 70.0, 55.0),
            SemanticMood::Neutral => NEUTRAL_HSL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticReading {
    pub mood: SemanticMood,
    pub total_weight: f32,
    /// Jitter amplitude for display.
    pub variance: f32,
    /// Light readings (total weight of 3 or less) should not recolour anything.
    pub emits: bool,
    pub hsl: Hsl,
}

/// First emotion with the most keyword hits; ties keep table order.
fn strongest_spoken(text: &str) -> Option<(&'static str, Hsl)> {
    let lowered = text.to_lowercase();
    let mut best: Option<(usize, &'static str, Hsl)> = None;
    for (name, keywords, hsl) in SPOKEN.iter() {
        let hits = keywords.iter().filter(|kw| lowered.contains(*kw)).count();
        if hits > best.map(|(count, _, _)| count).unwrap_or(0) {
            best = Some((hits, *name, *hsl));
        }
    }
    best.map(|(_, name, hsl)| (name, hsl))
}

/// Name of the spoken emotion, `"neutral"` when nothing matched.
pub fn spoken_emotion(text: &str) -> &'static str {
    strongest_spoken(text).map(|(name, _)| name).unwrap_or("neutral")
}

pub fn classify_spoken(text: &str) -> Hsl {
    strongest_spoken(text).map(|(_, hsl)| hsl).unwrap_or(NEUTRAL_HSL)
}

pub fn semantic_weight(word: &str) -> f32 {
    SEMANTIC_WEIGHTS.get(word).copied().unwrap_or(0.0)
}

fn bucket(word: &str, weight: f32) -> Option<SemanticMood> {
    if weight > 7.0 {
        return Some(SemanticMood::Transcendent);
    }
    if weight > 5.0 {
        return Some(SemanticMood::Mystical);
    }
    PROBES
        .iter()
        .find(|(probes, _)| probes.iter().any(|probe| word.contains(probe)))
        .map(|(_, mood)| *mood)
}

pub fn classify_semantic(text: &str) -> SemanticReading {
    let mut total_weight = 0.0f32;
    let mut counts: Vec<(SemanticMood, usize)> = Vec::new();
    for word in words(text) {
        let weight = semantic_weight(&word);
        total_weight += weight;
        if let Some(mood) = bucket(&word, weight) {
            match counts.iter_mut().find(|(seen, _)| *seen == mood) {
                Some((_, count)) => *count += 1,
                None => counts.push((mood, 1)),
            }
        }
    }

    let mut mood = SemanticMood::Neutral;
    let mut top = 0;
    for (candidate, count) in counts {
        if count > top {
            top = count;
            mood = candidate;
        }
    }

    SemanticReading {
        mood,
        total_weight,
        variance: (total_weight * 2.0).min(30.0),
        emits: total_weight > 3.0,
        hsl: mood.hsl(),
    }
}

/// Nudges each channel by a uniform offset of at most `variance / 2`
/// (a quarter for lightness), clamped to readable bounds.
pub fn jitter<R: RngCore + ?Sized>(hsl: Hsl, variance: f32, rng: &mut R) -> Hsl {
    let mut offset = |scale: f32| (rng.gen::<f32>() - 0.5) * variance * scale;
    Hsl::new(
        (hsl.h + offset(1.0)).clamp(0.0, 360.0),
        (hsl.s + offset(1.0)).clamp(20.0, 100.0),
        (hsl.l + offset(0.5)).clamp(30.0, 70.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn spoken_picks_emotion_with_most_hits() {
        let calm = "I feel so calm and relaxed, almost zen";
        assert_eq!(classify_spoken(calm), Hsl::new(120.0, 50.0, 50.0));
        assert_eq!(spoken_emotion(calm), "calm");
        assert_eq!(classify_spoken("Stressed and WORRIED"), Hsl::new(30.0, 70.0, 45.0));
        assert_eq!(classify_spoken("the kettle boils"), NEUTRAL_HSL);
        assert_eq!(classify_spoken(""), NEUTRAL_HSL);
        assert_eq!(spoken_emotion("the kettle boils"), "neutral");
    }

    #[test]
    fn spoken_ties_go_to_earlier_emotion() {
        // one happy hit, one sad hit
        assert_eq!(classify_spoken("great but lonely"), Hsl::new(60.0, 80.0, 60.0));
        assert_eq!(spoken_emotion("great but lonely"), "happy");
    }

    #[test]
    fn heavy_words_land_in_transcendent() {
        let reading = classify_semantic("rage and ecstasy and bliss");
        assert_eq!(reading.mood, SemanticMood::Transcendent);
        assert_eq!(reading.total_weight, 27.0);
        assert_eq!(reading.variance, 30.0);
        assert!(reading.emits);
        assert_eq!(reading.hsl, Hsl::new(270.0, 80.0, 60.0));
    }

    #[test]
    fn probes_catch_unweighted_words() {
        let reading = classify_semantic("darkness thinking darkly");
        assert_eq!(reading.mood, SemanticMood::Melancholic);
        assert_eq!(reading.total_weight, 0.0);
        assert!(!reading.emits);
    }

    #[test]
    fn light_reading_does_not_emit() {
        let reading = classify_semantic("quiet");
        assert_eq!(reading.total_weight, 3.0);
        assert!(!reading.emits);
        assert_eq!(reading.variance, 6.0);
        assert_eq!(reading.mood, SemanticMood::Neutral);
    }

    #[test]
    fn jitter_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let out = jitter(Hsl::new(358.0, 95.0, 68.0), 30.0, &mut rng);
            assert!((0.0..=360.0).contains(&out.h));
            assert!((20.0..=100.0).contains(&out.s));
            assert!((30.0..=70.0).contains(&out.l));
        }
        let still = jitter(Hsl::new(100.0, 50.0, 50.0), 0.0, &mut rng);
        assert_eq!(still, Hsl::new(100.0, 50.0, 50.0));
    }
}
