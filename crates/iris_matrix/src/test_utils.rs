use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use fxhash::{FxHashMap, FxHashSet};
use iris_osrm::{route_options::RouteOptions, travel_mode::TravelMode};
use thiserror::Error;

use crate::{
    city_map::{City, CityIdx, CityMap},
    route_service::{RouteService, RouteSummary},
};

/// `n` cities named `City{i}`, city `i` sits at latitude `i / 10`.
pub fn test_cities(n: usize) -> CityMap {
    CityMap::from_cities(
        (0..n).map(|i| City::new(format!("City{i}"), i as f64 * 0.1, i as f64 * 0.2)),
    )
    .unwrap()
}

fn city_idx(point: geo_types::Point) -> CityIdx {
    (point.y() * 10.0).round() as CityIdx
}

/// Deterministic route between two test cities.
pub fn expected_route(from: CityIdx, to: CityIdx) -> RouteSummary {
    RouteSummary {
        duration: 3600.0 + 600.0 * from as f64 + 60.0 * to as f64,
        distance: 10_000.0 * (from * 10 + to) as f64 + 999.5,
    }
}

#[derive(Debug, Error)]
#[error("stub failure {from} -> {to}")]
pub struct StubError {
    from: CityIdx,
    to: CityIdx,
}

#[derive(Default)]
pub struct StubRouteService {
    failing_pairs: FxHashSet<(CityIdx, CityIdx)>,
    source_delays: FxHashMap<CityIdx, Duration>,
    query_delay: Option<Duration>,
    panicking_source: Option<CityIdx>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubRouteService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_pair(mut self, from: CityIdx, to: CityIdx) -> Self {
        self.failing_pairs.insert((from, to));
        self
    }

    /// Every query issued from `source` sleeps for `delay`.
    pub fn delay_source(mut self, source: CityIdx, delay: Duration) -> Self {
        self.source_delays.insert(source, delay);
        self
    }

    pub fn delay_queries(mut self, delay: Duration) -> Self {
        self.query_delay = Some(delay);
        self
    }

    pub fn panic_on_source(mut self, source: CityIdx) -> Self {
        self.panicking_source = Some(source);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl RouteService for StubRouteService {
    type Error = StubError;

    async fn route(
        &self,
        origin: geo_types::Point,
        destination: geo_types::Point,
        _mode: TravelMode,
        _options: &RouteOptions,
    ) -> Result<RouteSummary, StubError> {
        let from = city_idx(origin);
        let to = city_idx(destination);

        self.calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        if self.panicking_source == Some(from) {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            panic!("stub panic for source {from}");
        }

        let delay = self.source_delays.get(&from).copied().or(self.query_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_pairs.contains(&(from, to)) {
            return Err(StubError { from, to });
        }

        Ok(expected_route(from, to))
    }
}
