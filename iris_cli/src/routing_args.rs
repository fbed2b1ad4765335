use std::num::NonZeroUsize;

use anyhow::Context;
use clap::Args;
use iris_matrix::matrix_params::{DurationFormat, MatrixParams};
use iris_osrm::{
    client::{DEFAULT_OSRM_ROUTE_URL, OsrmRouteClient, OsrmRouteClientParams},
    route_options::RouteOptions,
    travel_mode::TravelMode,
};

use crate::parsers;

pub const OSRM_URL_ENV_VAR: &str = "IRIS_OSRM_URL";

#[derive(Args, Debug)]
pub struct RoutingArgs {
    /// Base URL of the OSRM route service, defaults to $IRIS_OSRM_URL
    #[arg(long)]
    osrm_url: Option<String>,

    /// driving, cycling or walking
    #[arg(short, long, value_parser = parsers::parse_travel_mode, default_value = "driving")]
    mode: TravelMode,

    /// Timeout of a single route request (e.g., "50s", "PT1M")
    #[arg(long, value_parser = parsers::parse_duration, default_value = "50s")]
    timeout: jiff::SignedDuration,

    /// Extra query option sent with every request, repeatable (e.g., "overview=simplified")
    #[arg(long = "option", value_parser = parsers::parse_key_value)]
    options: Vec<(String, String)>,
}

impl RoutingArgs {
    pub fn osrm_url(&self) -> String {
        self.osrm_url
            .clone()
            .or_else(|| std::env::var(OSRM_URL_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_OSRM_ROUTE_URL.to_string())
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn route_options(&self) -> RouteOptions {
        let mut options = RouteOptions::default();
        for (key, value) in &self.options {
            options.insert(key.as_str(), value.as_str());
        }
        options
    }

    pub fn build_client(&self) -> anyhow::Result<OsrmRouteClient> {
        let timeout = std::time::Duration::try_from(self.timeout)
            .context("Request timeout must be positive")?;

        Ok(OsrmRouteClient::new(OsrmRouteClientParams {
            osrm_url: self.osrm_url(),
            timeout,
        })?)
    }

    pub fn matrix_params(
        &self,
        duration_format: DurationFormat,
        max_concurrent_rows: Option<NonZeroUsize>,
    ) -> MatrixParams {
        MatrixParams {
            mode: self.mode,
            options: self.route_options(),
            duration_format,
            max_concurrent_rows,
        }
    }
}
