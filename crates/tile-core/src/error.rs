//! Configuration and contract errors raised at generation entry.

/// Everything that can make a tile request invalid.
///
/// Noise evaluation itself never fails; every variant here is detected before
/// any output field is allocated.
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    #[error("noise scale must be a finite value > 0, got {0}")]
    InvalidScale(f32),

    #[error("sample size must be at least 2, got {0}")]
    InvalidSampleSize(usize),

    #[error("resolution multiplier must be at least 1, got {0}")]
    InvalidResolution(usize),

    #[error("sample size {sample_size} at resolution {resolution} exceeds the field size limit")]
    FieldTooLarge { sample_size: usize, resolution: usize },

    #[error("wave {index}: {reason}")]
    InvalidWave { index: usize, reason: &'static str },

    #[error("wave amplitudes must sum to a finite value > 0, got {0}")]
    ZeroAmplitude(f32),

    #[error("{field} bands are empty")]
    EmptyBands { field: &'static str },

    #[error("{field} band {index}: threshold {threshold} is outside [0, 1]")]
    ThresholdOutOfRange { field: &'static str, index: usize, threshold: f32 },

    #[error("{field} band {index}: threshold {threshold} is below the previous threshold {previous}")]
    UnsortedBands { field: &'static str, index: usize, threshold: f32, previous: f32 },

    #[error("band list has {found} bands, classification was made with {expected}")]
    BandCountMismatch { expected: usize, found: usize },

    #[error("max height must be finite, got {0}")]
    InvalidMaxHeight(f32),

    #[error("gradient has no colour stops")]
    EmptyGradient,

    #[error("response curve has no keys")]
    EmptyCurve,

    #[error("response curve key {index}: time {time} does not increase past {previous}")]
    UnsortedCurve { index: usize, time: f32, previous: f32 },

    #[error("field dimensions differ: expected {expected:?}, found {found:?}")]
    DimensionMismatch { expected: (usize, usize), found: (usize, usize) },

    #[error("band index {index} is out of range for {band_count} bands")]
    BandIndexOutOfRange { index: usize, band_count: usize },

    #[error("vertex buffer holds {found} vertices, height field needs {expected}")]
    VertexCountMismatch { expected: usize, found: usize },

    #[error("invalid latitude gradient: {0}")]
    InvalidLatitude(&'static str),

    #[error("grid must have at least one column and one row")]
    EmptyGrid,

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TileError>;
