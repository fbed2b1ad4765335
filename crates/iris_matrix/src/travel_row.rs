use tracing::{debug, warn};

use crate::{
    cell::{Cell, Row},
    city_map::{CityIdx, CityMap, CityMapError},
    matrix_params::MatrixParams,
    route_service::RouteService,
};

/// Computes the row of `source` against every city, in canonical order.
///
/// Destinations are queried one after the other. A failed query produces an
/// unavailable cell and the row carries on.
pub async fn compute_row<S>(
    service: &S,
    cities: &CityMap,
    source: CityIdx,
    params: &MatrixParams,
) -> Row
where
    S: RouteService,
{
    let Some(source_city) = cities.get(source) else {
        return Row::new();
    };
    let origin: geo_types::Point = source_city.into();

    let mut row = Row::with_capacity(cities.len());

    for (destination, destination_city) in cities.iter().enumerate() {
        if destination == source {
            row.push(Cell::same_location());
            continue;
        }

        let cell = match service
            .route(
                origin,
                destination_city.into(),
                params.mode,
                &params.options,
            )
            .await
        {
            Ok(summary) => {
                debug!(
                    "{} -> {}: {}s, {}m",
                    source_city.name, destination_city.name, summary.duration, summary.distance
                );
                Cell::routed(summary.duration, summary.distance, params.duration_format)
            }
            Err(err) => {
                warn!(
                    "Could not route {} -> {}: {}",
                    source_city.name, destination_city.name, err
                );
                Cell::unavailable()
            }
        };

        row.push(cell);
    }

    row
}

/// Same as [`compute_row`] for a source given by name.
pub async fn compute_row_for<S>(
    service: &S,
    cities: &CityMap,
    source: &str,
    params: &MatrixParams,
) -> Result<Row, CityMapError>
where
    S: RouteService,
{
    let source = cities.city_index(source)?;
    Ok(compute_row(service, cities, source, params).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cell::CellStatus,
        matrix_params::DurationFormat,
        test_utils::{StubRouteService, expected_route, test_cities},
    };

    #[tokio::test]
    async fn test_row_has_zero_cell_on_diagonal() {
        let cities = test_cities(4);
        let service = StubRouteService::new();

        let row = compute_row(&service, &cities, 2, &MatrixParams::default()).await;

        assert_eq!(row.len(), 4);
        assert_eq!(row[2], Cell::same_location());
        // no query for the diagonal
        assert_eq!(service.calls(), 3);
    }

    #[tokio::test]
    async fn test_row_matches_service_values() {
        let cities = test_cities(3);
        let service = StubRouteService::new();

        let row = compute_row(&service, &cities, 0, &MatrixParams::default()).await;

        for (destination, cell) in row.iter().enumerate().skip(1) {
            let expected = expected_route(0, destination);
            assert_eq!(cell.status, CellStatus::Routed);
            assert_eq!(cell.duration, expected.duration);
            assert_eq!(cell.distance_km, (expected.distance / 1000.0) as u64);
            assert_eq!(cell.display, None);
        }
    }

    #[tokio::test]
    async fn test_failed_pair_does_not_abort_row() {
        let cities = test_cities(4);
        let service = StubRouteService::new().fail_pair(1, 2);

        let row = compute_row(&service, &cities, 1, &MatrixParams::default()).await;

        assert_eq!(row.len(), 4);
        assert_eq!(row[2], Cell::unavailable());
        assert_eq!(row[2].duration, 0.0);
        assert_eq!(row[2].distance_km, 0);
        for destination in [0, 3] {
            assert_eq!(row[destination].duration, expected_route(1, destination).duration);
        }
    }

    #[tokio::test]
    async fn test_readable_durations() {
        let cities = test_cities(2);
        let service = StubRouteService::new();
        let params = MatrixParams {
            duration_format: DurationFormat::Readable,
            ..MatrixParams::default()
        };

        let row = compute_row(&service, &cities, 0, &params).await;

        assert_eq!(row[1].display.as_deref(), Some("1 hour(s) 1 minute(s)"));
    }

    #[tokio::test]
    async fn test_unknown_source_city() {
        let cities = test_cities(2);
        let service = StubRouteService::new();

        let result = compute_row_for(&service, &cities, "Atlantis", &MatrixParams::default()).await;

        assert!(matches!(result, Err(CityMapError::UnknownCity(_))));
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_row_for_known_city() {
        let cities = test_cities(3);
        let service = StubRouteService::new();

        let row = compute_row_for(&service, &cities, "City1", &MatrixParams::default())
            .await
            .unwrap();

        assert_eq!(row[1], Cell::same_location());
        assert_eq!(row[0].duration, expected_route(1, 0).duration);
    }
}
