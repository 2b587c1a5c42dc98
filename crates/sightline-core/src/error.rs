//! Configuration errors raised before any terrain is sampled.

/// Rejected camera settings or position.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("horizontal field of view must be within {min}..={max} degrees, got {value}")]
    FovOutOfRange { value: f64, min: f64, max: f64 },

    #[error("{field} must be positive, got {value}")]
    NonPositiveStep { field: &'static str, value: f64 },

    #[error("max range ({max_range} m) is shorter than the range step ({range_step} m)")]
    RangeShorterThanStep { max_range: f64, range_step: f64 },

    #[error("camera height must not be negative, got {0}")]
    NegativeHeight(f64),

    #[error("settings would take {samples} terrain samples (limit {limit})")]
    TooManySamples { samples: usize, limit: usize },

    #[error("latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
