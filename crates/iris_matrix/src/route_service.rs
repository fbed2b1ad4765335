use iris_osrm::{
    client::{OsrmError, OsrmRouteClient},
    route_options::RouteOptions,
    travel_mode::TravelMode,
};

/// Duration and distance of a single resolved route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    /// Seconds
    pub duration: f64,
    /// Meters
    pub distance: f64,
}

/// A service able to resolve the route between two points.
///
/// The generator holds the service behind an `Arc` and queries it from many
/// tasks at once, so implementations must be shareable across threads.
pub trait RouteService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn route(
        &self,
        origin: geo_types::Point,
        destination: geo_types::Point,
        mode: TravelMode,
        options: &RouteOptions,
    ) -> impl Future<Output = Result<RouteSummary, Self::Error>> + Send;
}

impl RouteService for OsrmRouteClient {
    type Error = OsrmError;

    async fn route(
        &self,
        origin: geo_types::Point,
        destination: geo_types::Point,
        mode: TravelMode,
        options: &RouteOptions,
    ) -> Result<RouteSummary, OsrmError> {
        let route = OsrmRouteClient::route(self, origin, destination, mode, options).await?;

        Ok(RouteSummary {
            duration: route.duration,
            distance: route.distance,
        })
    }
}
