use chrono::{DateTime, Utc};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::color::{Hsl, Rgb};
use crate::error::ConfigError;
use crate::lexicon::Glyph;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    /// Interaction depth at which phases 1..=4 begin.
    pub thresholds: [u64; 4],
    pub memory_threshold: f32,
    pub memory_min_phase: u8,
    pub max_memory_age: u32,
    pub orbit_radius: [f32; 2],
}

impl Default for PhaseConfig {
    fn default() -> Self {
        PhaseConfig {
            thresholds: [0, 3, 7, 20],
            memory_threshold: 0.65,
            memory_min_phase: 3,
            max_memory_age: 500,
            orbit_radius: [120.0, 180.0],
        }
    }
}

impl PhaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.thresholds;
        if t[0] != 0 || t.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::Thresholds(t));
        }
        if !(0.0..=1.0).contains(&self.memory_threshold) {
            return Err(ConfigError::UnitRange {
                name: "memory_threshold",
                value: self.memory_threshold,
            });
        }
        if self.max_memory_age == 0 {
            return Err(ConfigError::Zero("max_memory_age"));
        }
        let [low, high] = self.orbit_radius;
        if !(low >= 0.0 && low <= high) {
            return Err(ConfigError::OrbitRadius(self.orbit_radius));
        }
        Ok(())
    }

    /// Phase for a given interaction depth: the last threshold not above it.
    pub fn phase_for_depth(&self, depth: u64) -> u8 {
        for (idx, threshold) in self.thresholds.iter().enumerate().rev() {
            if depth >= *threshold {
                return idx as u8 + 1;
            }
        }
        1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPosition {
    pub angle: f32,
    pub radius: f32,
}

/// Where a memory node sits on screen for one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitSample {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryNode {
    pub id: Uuid,
    pub token: String,
    pub resonance_score: f32,
    pub color: Rgb,
    pub hsl: Hsl,
    pub glyph: Glyph,
    pub age: u32,
    pub position: OrbitPosition,
    pub created_at: DateTime<Utc>,
}

impl MemoryNode {
    pub fn orbit(&self, frame: u64, center: (f32, f32), max_age: u32) -> OrbitSample {
        let time = frame as f32 * 0.05;
        let speed = 0.3 + self.resonance_score * 0.2;
        let angle = (self.position.angle + time * speed) % 360.0;
        let radians = angle.to_radians();
        let age = self.age as f32;
        OrbitSample {
            x: center.0 + radians.cos() * self.position.radius,
            y: center.1 + radians.sin() * self.position.radius,
            opacity: (1.0 - age / max_age.max(1) as f32).max(0.3),
            scale: 0.8 + self.resonance_score * 0.4 - age * 0.001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    pub current_phase: u8,
    pub interaction_depth: u64,
    pub memory_nodes: Vec<MemoryNode>,
    pub phase_transition_complete: bool,
}

impl Default for PhaseState {
    fn default() -> Self {
        PhaseState {
            current_phase: 1,
            interaction_depth: 0,
            memory_nodes: Vec::new(),
            phase_transition_complete: false,
        }
    }
}

pub fn phase_description(phase: u8) -> &'static str {
    match phase {
        1 => "Initiation Core",
        2 => "Emergent Wave Field",
        3 => "Photonic Field Morph",
        4 => "Living Memory Field",
        _ => "Unknown Phase",
    }
}

/// Owns the session's phase progression and orbiting memory nodes.
#[derive(Debug, Clone, Default)]
pub struct PhaseManager {
    state: PhaseState,
    config: PhaseConfig,
}

impl PhaseManager {
    pub fn new(config: PhaseConfig) -> Self {
        PhaseManager {
            state: PhaseState::default(),
            config,
        }
    }

    pub fn config(&self) -> &PhaseConfig {
        &self.config
    }

    pub fn process_interaction<R: RngCore + ?Sized>(
        &mut self,
        token: &str,
        resonance_score: f32,
        color: Rgb,
        hsl: Hsl,
        dominant_glyph: Glyph,
        rng: &mut R,
    ) -> PhaseState {
        self.state.interaction_depth += 1;

        let phase = self.config.phase_for_depth(self.state.interaction_depth);
        if phase != self.state.current_phase {
            info!(
                from = self.state.current_phase,
                to = phase,
                depth = self.state.interaction_depth,
                "phase.transition"
            );
            self.state.current_phase = phase;
            self.state.phase_transition_complete = false;
        }

        if resonance_score >= self.config.memory_threshold
            && self.state.current_phase >= self.config.memory_min_phase
        {
            let node =
                self.create_memory_node(token, resonance_score, color, hsl, dominant_glyph, rng);
            debug!(id = %node.id, glyph = %node.glyph, score = resonance_score, "memory.created");
            self.state.memory_nodes.push(node);
        }

        self.age_memory_nodes();
        self.state.clone()
    }

    fn create_memory_node<R: RngCore + ?Sized>(
        &self,
        token: &str,
        resonance_score: f32,
        color: Rgb,
        hsl: Hsl,
        glyph: Glyph,
        rng: &mut R,
    ) -> MemoryNode {
        let [low, high] = self.config.orbit_radius;
        let position = OrbitPosition {
            angle: rng.gen::<f32>() * 360.0,
            radius: low + rng.gen::<f32>() * (high - low),
        };
        MemoryNode {
            id: uuid::Builder::from_random_bytes(rng.gen()).into_uuid(),
            token: token.to_string(),
            resonance_score,
            color,
            hsl,
            glyph,
            age: 0,
            position,
            created_at: Utc::now(),
        }
    }

    fn age_memory_nodes(&mut self) {
        let max_age = self.config.max_memory_age;
        let before = self.state.memory_nodes.len();
        for node in &mut self.state.memory_nodes {
            node.age = node.age.saturating_add(1);
        }
        self.state.memory_nodes.retain(|node| node.age < max_age);
        let pruned = before - self.state.memory_nodes.len();
        if pruned > 0 {
            debug!(pruned, remaining = self.state.memory_nodes.len(), "memory.pruned");
        }
    }

    /// Marks the current phase's transition animation as played.
    pub fn complete_transition(&mut self) {
        self.state.phase_transition_complete = true;
    }

    pub fn phase_description(&self, phase: u8) -> &'static str {
        phase_description(phase)
    }

    pub fn current_state(&self) -> PhaseState {
        self.state.clone()
    }

    /// Replaces the whole state; nothing from the previous state survives.
    pub fn load_state(&mut self, state: PhaseState) {
        self.state = state;
    }
}
