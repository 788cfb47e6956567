pub mod affect;
pub mod color;
pub mod config;
pub mod enhanced;
pub mod error;
pub mod glyph_map;
pub mod lexicon;
pub mod phase;
pub mod resonance;
pub mod session;
pub mod timeline;
pub mod tokens;

pub use affect::{
    classify_semantic, classify_spoken, jitter, spoken_emotion, SemanticMood, SemanticReading,
};
pub use color::{Hsl, Rgb};
pub use config::SessionConfig;
pub use enhanced::{
    convert_to_legacy_format, EmotionalProfile, EnhancedResonanceInterpreter, LegacyResonance,
};
pub use error::{ColorError, ConfigError, GlyphMapError};
pub use glyph_map::{find_glyph_for_hue, GlyphEmotionEntry, GlyphEmotionMap};
pub use lexicon::{Emotion, Glyph};
pub use phase::{phase_description, MemoryNode, PhaseConfig, PhaseManager, PhaseState};
pub use resonance::{GlyphScores, MoodParticle, ResonanceInterpreter, ResonanceResult};
pub use session::{MoodSession, SessionFrame};
pub use timeline::{MoodTimeline, TimelineEntry};
pub use tokens::{ResonantToken, TokenFieldScanner};
