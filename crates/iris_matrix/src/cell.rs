use crate::matrix_params::DurationFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Routed,
    SameLocation,
    /// The routing service could not resolve the pair
    Unavailable,
}

/// Result of one ordered city pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Seconds
    pub duration: f64,
    /// Whole kilometers, truncated
    pub distance_km: u64,
    /// Preformatted duration, only set for `DurationFormat::Readable`
    pub display: Option<String>,
    pub status: CellStatus,
}

pub type Row = Vec<Cell>;

impl Cell {
    pub fn same_location() -> Self {
        Self {
            duration: 0.0,
            distance_km: 0,
            display: None,
            status: CellStatus::SameLocation,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            duration: 0.0,
            distance_km: 0,
            display: None,
            status: CellStatus::Unavailable,
        }
    }

    pub fn routed(duration: f64, distance_meters: f64, format: DurationFormat) -> Self {
        let display = match format {
            DurationFormat::Raw => None,
            DurationFormat::Readable => Some(format_duration(duration)),
        };

        Self {
            duration,
            distance_km: meters_to_whole_km(distance_meters),
            display,
            status: CellStatus::Routed,
        }
    }

    pub fn is_routed(&self) -> bool {
        self.status == CellStatus::Routed
    }
}

/// Truncating division, negative or NaN inputs give 0.
pub fn meters_to_whole_km(meters: f64) -> u64 {
    (meters / 1000.0) as u64
}

pub fn format_duration(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;

    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(format!("{hours} hour(s)"));
    }
    if minutes > 0 || hours == 0 {
        parts.push(format!("{minutes} minute(s)"));
    }

    parts.join(" ")
}
