use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("malformed hex colour: {0:?}")]
    MalformedHex(String),
}

#[derive(Debug, Error)]
pub enum GlyphMapError {
    #[error("glyph table is empty")]
    Empty,
    #[error("entry {emotion:?} has inverted range {h_min}..={h_max}")]
    InvertedRange {
        emotion: String,
        h_min: u16,
        h_max: u16,
    },
    #[error("entry {emotion:?} extends past 359 (h_max={h_max})")]
    OutOfCircle { emotion: String, h_max: u16 },
    #[error("hue {hue} is not covered by any entry")]
    Gap { hue: u16 },
    #[error("hue {hue} is claimed by both {first:?} and {second:?}")]
    Overlap {
        hue: u16,
        first: String,
        second: String,
    },
    #[error("failed to read glyph table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid glyph table json: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("phase thresholds must start at 0 and strictly increase, got {0:?}")]
    Thresholds([u64; 4]),
    #[error("{name} must lie within [0, 1], got {value}")]
    UnitRange { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("orbit radius range {0:?} is inverted or negative")]
    OrbitRadius([f32; 2]),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}
