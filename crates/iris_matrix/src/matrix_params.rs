use std::num::NonZeroUsize;

use iris_osrm::{route_options::RouteOptions, travel_mode::TravelMode};

/// How durations are presented to humans. The stored duration is always seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurationFormat {
    /// Seconds with two decimals
    #[default]
    Raw,
    /// "H hour(s) M minute(s)"
    Readable,
}

#[derive(Clone, Debug, Default)]
pub struct MatrixParams {
    pub mode: TravelMode,
    pub options: RouteOptions,
    pub duration_format: DurationFormat,

    /// Maximum number of source rows computed at the same time.
    /// `None` starts one task per city immediately.
    pub max_concurrent_rows: Option<NonZeroUsize>,
}
