//! One user's running session: every submitted line flows through the basic
//! and enhanced interpreters, the phase manager, the hue table and the
//! timeline.

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use crate::affect::{self, SemanticReading};
use crate::color::Hsl;
use crate::config::SessionConfig;
use crate::enhanced::{
    convert_to_legacy_format, EmotionalProfile, EnhancedResonanceInterpreter, LegacyResonance,
};
use crate::error::ColorError;
use crate::glyph_map::{GlyphEmotionEntry, GlyphEmotionMap};
use crate::lexicon::Glyph;
use crate::phase::{phase_description, PhaseManager, PhaseState};
use crate::resonance::{ResonanceInterpreter, ResonanceResult};
use crate::timeline::{MoodTimeline, TimelineEntry};
use crate::tokens::{ResonantToken, TokenFieldScanner};

/// Everything one submission produced.
#[derive(Debug, Clone, Serialize)]
pub struct SessionFrame {
    pub resonance: ResonanceResult,
    pub dominant_glyph: Glyph,
    pub profile: EmotionalProfile,
    pub phase: PhaseState,
    pub phase_description: &'static str,
    pub hue_glyph: Option<GlyphEmotionEntry>,
    pub tokens: Vec<ResonantToken>,
}

pub struct MoodSession {
    config: SessionConfig,
    glyph_map: GlyphEmotionMap,
    resonance: ResonanceInterpreter,
    enhanced: EnhancedResonanceInterpreter,
    phases: PhaseManager,
    timeline: MoodTimeline,
    scanner: TokenFieldScanner,
    last_profile: Option<EmotionalProfile>,
    rng: ChaCha8Rng,
}

impl MoodSession {
    pub fn new(config: SessionConfig, glyph_map: GlyphEmotionMap) -> Self {
        MoodSession::with_rng(config, glyph_map, ChaCha8Rng::from_entropy())
    }

    /// Reproducible session: node placement, marks and jitter follow `seed`.
    pub fn with_seed(config: SessionConfig, glyph_map: GlyphEmotionMap, seed: u64) -> Self {
        MoodSession::with_rng(config, glyph_map, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: SessionConfig, glyph_map: GlyphEmotionMap, rng: ChaCha8Rng) -> Self {
        MoodSession {
            resonance: ResonanceInterpreter::new(),
            enhanced: EnhancedResonanceInterpreter::with_window(config.rhythm_window),
            phases: PhaseManager::new(config.phase.clone()),
            timeline: MoodTimeline::with_capacity(config.timeline_capacity),
            scanner: TokenFieldScanner::new(),
            last_profile: None,
            config,
            glyph_map,
            rng,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn glyph_map(&self) -> &GlyphEmotionMap {
        &self.glyph_map
    }

    pub fn submit(&mut self, text: &str) -> SessionFrame {
        let resonance = self.resonance.run_codex_task(text);
        let (dominant_glyph, score) = resonance
            .glyphs
            .dominant()
            .unwrap_or((Glyph::Mnemonic, 0.0));

        let phase = self.phases.process_interaction(
            text,
            score,
            resonance.mood.color,
            resonance.mood.hsl,
            dominant_glyph,
            &mut self.rng,
        );
        let profile = self.enhanced.analyze_text_emotionally(text, &mut self.rng);
        let hue_glyph = self
            .glyph_map
            .find_glyph_for_hue(resonance.mood.hsl.h)
            .cloned();
        self.timeline.record(resonance.mood.hsl, text, Utc::now());
        self.last_profile = Some(profile.clone());

        info!(
            depth = phase.interaction_depth,
            phase = phase.current_phase,
            glyph = %dominant_glyph,
            score,
            cluster = %profile.dominant_cluster,
            "session.submit"
        );

        SessionFrame {
            phase_description: phase_description(phase.current_phase),
            tokens: self.scanner.scan(text),
            resonance,
            dominant_glyph,
            profile,
            phase,
            hue_glyph,
        }
    }

    pub fn phase_state(&self) -> PhaseState {
        self.phases.current_state()
    }

    pub fn load_state(&mut self, state: PhaseState) {
        info!(
            depth = state.interaction_depth,
            phase = state.current_phase,
            nodes = state.memory_nodes.len(),
            "session.state_loaded"
        );
        self.phases.load_state(state);
    }

    pub fn complete_transition(&mut self) {
        self.phases.complete_transition();
    }

    pub fn find_glyph_for_hue(&self, hue: f32) -> Option<&GlyphEmotionEntry> {
        self.glyph_map.find_glyph_for_hue(hue)
    }

    /// Recent moods, as many as the display setting allows.
    pub fn history(&self) -> Vec<TimelineEntry> {
        self.timeline.recent(self.config.timeline_display)
    }

    pub fn last_profile(&self) -> Option<&EmotionalProfile> {
        self.last_profile.as_ref()
    }

    /// Legacy view of the most recent profile, if any text was submitted.
    pub fn legacy(&self) -> Option<Result<LegacyResonance, ColorError>> {
        self.last_profile.as_ref().map(convert_to_legacy_format)
    }

    /// Spoken-mood colour with display jitter applied.
    pub fn spoken(&mut self, text: &str) -> Hsl {
        let base = affect::classify_spoken(text);
        affect::jitter(base, self.config.jitter_variance, &mut self.rng)
    }

    /// Semantic reading whose colour carries display jitter scaled by its weight.
    pub fn semantic(&mut self, text: &str) -> SemanticReading {
        let mut reading = affect::classify_semantic(text);
        reading.hsl = affect::jitter(reading.hsl, reading.variance, &mut self.rng);
        reading
    }
}

impl Default for MoodSession {
    fn default() -> Self {
        MoodSession::new(SessionConfig::default(), GlyphEmotionMap::default())
    }
}
