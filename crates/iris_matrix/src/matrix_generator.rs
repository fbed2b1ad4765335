use std::sync::Arc;

use parking_lot::Mutex;
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{error, info};

use crate::{
    cell::{Cell, Row},
    city_map::{CityIdx, CityMap},
    matrix_params::MatrixParams,
    progress::{Progress, ProgressHandler},
    route_service::RouteService,
    travel_matrix::TravelMatrix,
    travel_row::compute_row,
};

/// Builds the full travel matrix by computing every source row concurrently.
pub struct MatrixGenerator<S> {
    service: Arc<S>,
    on_progress_handler: Option<ProgressHandler>,
}

impl<S> MatrixGenerator<S>
where
    S: RouteService + 'static,
{
    pub fn new(service: S) -> Self {
        Self::from_arc(Arc::new(service))
    }

    pub fn from_arc(service: Arc<S>) -> Self {
        Self {
            service,
            on_progress_handler: None,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Called with `(completed, total)` each time a source row completes.
    pub fn on_progress<F>(&mut self, callback: F)
    where
        F: FnMut(usize, usize) + Send + Sync + 'static,
    {
        self.on_progress_handler = Some(Arc::new(Mutex::new(callback)));
    }

    /// Spawns one task per source city and assembles the rows in city order.
    ///
    /// Tasks finish in any order; each carries its source index back and the
    /// row is stored in that slot. Per pair failures end up as unavailable
    /// cells, so this never fails.
    pub async fn generate(&self, cities: Arc<CityMap>, params: &MatrixParams) -> TravelMatrix {
        let total = cities.len();
        if total == 0 {
            return TravelMatrix::empty();
        }

        let params = Arc::new(params.clone());
        let progress = Arc::new(Progress::new(total));
        let limiter = params
            .max_concurrent_rows
            .map(|limit| Arc::new(Semaphore::new(limit.get())));

        info!(
            "Generating {}x{} matrix ({} mode, {})",
            total,
            total,
            params.mode,
            match params.max_concurrent_rows {
                Some(limit) => format!("at most {limit} rows at a time"),
                None => "all rows at once".to_string(),
            }
        );

        let mut tasks = JoinSet::new();

        for source in 0..total {
            let service = Arc::clone(&self.service);
            let cities = Arc::clone(&cities);
            let params = Arc::clone(&params);
            let progress = Arc::clone(&progress);
            let limiter = limiter.clone();
            let handler = self.on_progress_handler.clone();

            tasks.spawn(async move {
                let _permit = match limiter {
                    Some(limiter) => limiter.acquire_owned().await.ok(),
                    None => None,
                };

                let row = compute_row(service.as_ref(), &cities, source, &params).await;

                let completed = progress.complete();
                info!("Progress: {}/{}", completed, progress.total());
                if let Some(handler) = handler {
                    handler.lock()(completed, progress.total());
                }

                (source, row)
            });
        }

        let mut slots: Vec<Option<Row>> = vec![None; total];

        while let Some(result) = tasks.join_next().await {
            match result {
                Ok((source, row)) => slots[source] = Some(row),
                Err(err) => error!("Row task failed: {}", err),
            }
        }

        let rows = slots
            .into_iter()
            .enumerate()
            .map(|(source, slot)| {
                slot.unwrap_or_else(|| {
                    let name = cities.get(source).map_or("?", |city| city.name.as_str());
                    error!("No row computed for {}, marking it unavailable", name);
                    unavailable_row(source, total)
                })
            })
            .collect();

        info!("Matrix generation completed: {}/{} rows", progress.completed(), total);

        TravelMatrix::new(cities.names(), rows)
    }
}

fn unavailable_row(source: CityIdx, total: usize) -> Row {
    (0..total)
        .map(|destination| {
            if destination == source {
                Cell::same_location()
            } else {
                Cell::unavailable()
            }
        })
        .collect()
}
