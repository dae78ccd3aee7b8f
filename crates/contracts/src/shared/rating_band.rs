use serde::{Deserialize, Serialize};

/// Ordinal color band assigned to a delivery rating value. Shared between
/// the deriver (which tags rating buckets) and the rendering host (which
/// colors donut segments).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    Unrated,
    VeryLow,
    Low,
    Medium,
    High,
    Excellent,
}

impl RatingBand {
    /// Cascading upper-bound check with no explicit floor: values at or
    /// below 0 land in `VeryLow`, anything above 4 (out-of-range values
    /// included) lands in `Excellent`.
    pub fn from_rating(rating: Option<f64>) -> Self {
        match rating {
            None => RatingBand::Unrated,
            Some(v) if v <= 1.0 => RatingBand::VeryLow,
            Some(v) if v <= 2.0 => RatingBand::Low,
            Some(v) if v <= 3.0 => RatingBand::Medium,
            Some(v) if v <= 4.0 => RatingBand::High,
            Some(_) => RatingBand::Excellent,
        }
    }

    /// Hex color rendered for this band.
    pub fn hex(&self) -> &'static str {
        match self {
            RatingBand::Unrated => "#90CAF9",
            RatingBand::VeryLow => "#E53935",
            RatingBand::Low => "#FB8C00",
            RatingBand::Medium => "#FDD835",
            RatingBand::High => "#43A047",
            RatingBand::Excellent => "#1B5E20",
        }
    }
}

/// Continuous red-to-dark-green scale applied to rating-valued bar charts.
pub const RATING_COLOR_SCALE: [&str; 5] =
    ["#E53935", "#FB8C00", "#FDD835", "#43A047", "#1B5E20"];
