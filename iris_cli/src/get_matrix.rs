use std::{num::NonZeroUsize, path::PathBuf, sync::Arc, time::Instant};

use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use indicatif::{ProgressBar, ProgressStyle};
use iris_matrix::{
    city_map::CityMap,
    export::{cell_text, save_csv},
    matrix_generator::MatrixGenerator,
    matrix_params::DurationFormat,
    travel_matrix::TravelMatrix,
};
use tracing::{info, warn};

use crate::routing_args::RoutingArgs;

#[derive(Args)]
pub struct GetMatrixArgs {
    /// Cities file, JSON `{ "name": [lat, lon] }` or CSV `name,lat,lon`
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output CSV file, the matrix is printed when omitted
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Write durations as "H hour(s) M minute(s)" instead of seconds
    #[arg(long)]
    readable: bool,

    /// Maximum number of cities computed at the same time (default: all)
    #[arg(short, long)]
    concurrency: Option<NonZeroUsize>,

    #[command(flatten)]
    routing: RoutingArgs,
}

fn print_matrix(matrix: &TravelMatrix, format: DurationFormat) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec![String::new()];
    header.extend(matrix.cities().iter().cloned());
    table.set_header(header);

    for (city, row) in matrix.cities().iter().zip(matrix.rows()) {
        let mut cells = vec![city.clone()];
        cells.extend(row.iter().map(|cell| {
            format!("{} ({} km)", cell_text(cell, format), cell.distance_km)
        }));
        table.add_row(cells);
    }

    println!("{table}");
}

pub async fn run(args: GetMatrixArgs) -> anyhow::Result<()> {
    let cities = Arc::new(CityMap::from_file(&args.input)?);
    info!("Loaded {} cities from {:?}", cities.len(), args.input);

    let format = if args.readable {
        DurationFormat::Readable
    } else {
        DurationFormat::Raw
    };
    let params = args.routing.matrix_params(format, args.concurrency);

    let mut generator = MatrixGenerator::new(args.routing.build_client()?);

    let loading_bar = ProgressBar::new(cities.len() as u64);
    loading_bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} ({elapsed})")?);

    let bar = loading_bar.clone();
    generator.on_progress(move |completed, _| bar.set_position(completed as u64));

    let start = Instant::now();
    let matrix = generator.generate(Arc::clone(&cities), &params).await;
    loading_bar.finish_and_clear();

    info!(
        "Generated matrix in {:.2} seconds.",
        start.elapsed().as_secs_f64()
    );

    let unavailable = matrix.unavailable_count();
    if unavailable > 0 {
        warn!("{} pairs could not be routed and were set to 0", unavailable);
    }

    match args.output {
        Some(path) => {
            save_csv(&path, &matrix, format)?;
            info!("Matrix saved to {:?}", path);
        }
        None => print_matrix(&matrix, format),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_fixture_cities() {
        let current_dir = env::current_dir().unwrap();

        let json = CityMap::from_file(&current_dir.join("tests/fixtures/cities.json")).unwrap();
        assert_eq!(json.len(), 8);
        assert_eq!(json.names()[0], "Saint-Hilaire-de-la-Cote");
        assert_eq!(json.names()[7], "Labenne");

        let csv = CityMap::from_file(&current_dir.join("tests/fixtures/cities.csv")).unwrap();
        assert_eq!(csv.names(), vec!["Nans-les-Pins", "Chamarande", "Port Cogolin"]);
    }
}
