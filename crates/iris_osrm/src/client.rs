use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{route_options::RouteOptions, travel_mode::TravelMode};

#[derive(Debug, Error)]
pub enum OsrmError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("OSRM error: {code} {message}")]
    Service { code: String, message: String },

    #[error("OSRM returned no route")]
    NoRoute,
}

/// First candidate route of an OSRM `route` response.
#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct OsrmRoute {
    /// Travel time in seconds
    pub duration: f64,

    /// Distance in meters
    pub distance: f64,
}

#[derive(Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

pub const DEFAULT_OSRM_ROUTE_URL: &str = "http://router.project-osrm.org/route/v1";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(50);

#[derive(Debug, Clone)]
pub struct OsrmRouteClientParams {
    /// Base of the route service, e.g. `http://host:5000/route/v1`
    pub osrm_url: String,
    pub timeout: Duration,
}

impl Default for OsrmRouteClientParams {
    fn default() -> Self {
        Self {
            osrm_url: DEFAULT_OSRM_ROUTE_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

pub struct OsrmRouteClient {
    params: OsrmRouteClientParams,
    client: reqwest::Client,
}

impl OsrmRouteClient {
    pub fn new(params: OsrmRouteClientParams) -> Result<Self, OsrmError> {
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;
        Ok(Self { params, client })
    }

    pub fn params(&self) -> &OsrmRouteClientParams {
        &self.params
    }

    pub fn route_url(
        &self,
        origin: geo_types::Point,
        destination: geo_types::Point,
        mode: TravelMode,
    ) -> String {
        format!(
            "{}/{}/{:.6},{:.6};{:.6},{:.6}",
            self.params.osrm_url.trim_end_matches('/'),
            mode,
            origin.x(),
            origin.y(),
            destination.x(),
            destination.y()
        )
    }

    pub async fn route(
        &self,
        origin: geo_types::Point,
        destination: geo_types::Point,
        mode: TravelMode,
        options: &RouteOptions,
    ) -> Result<OsrmRoute, OsrmError> {
        let url = self.route_url(origin, destination, mode);
        debug!("OsrmRouteClient: GET {}", url);

        let query: Vec<(&str, &str)> = options.iter().collect();
        let response = self.client.get(url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OsrmError::Api { status, message });
        }

        let body = response.text().await?;
        let route_response: OsrmRouteResponse = serde_json::from_str(&body)?;

        if route_response.code != "Ok" {
            return Err(OsrmError::Service {
                code: route_response.code,
                message: route_response.message.unwrap_or_default(),
            });
        }

        route_response
            .routes
            .into_iter()
            .next()
            .ok_or(OsrmError::NoRoute)
    }
}
