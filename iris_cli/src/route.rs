use std::path::PathBuf;

use clap::Args;
use iris_matrix::{cell::format_duration, city_map::CityMap, route_service::RouteService};

use crate::routing_args::RoutingArgs;

#[derive(Args)]
pub struct RouteArgs {
    /// Cities file, JSON `{ "name": [lat, lon] }` or CSV `name,lat,lon`
    #[arg(short = 'i', long)]
    input: PathBuf,

    #[arg(long)]
    from: String,

    #[arg(long)]
    to: String,

    #[command(flatten)]
    routing: RoutingArgs,
}

pub async fn run(args: RouteArgs) -> anyhow::Result<()> {
    let cities = CityMap::from_file(&args.input)?;
    let departure = cities.city(&args.from)?;
    let arrival = cities.city(&args.to)?;

    let client = args.routing.build_client()?;
    let mode = args.routing.mode();

    let summary = RouteService::route(
        &client,
        departure.into(),
        arrival.into(),
        mode,
        &args.routing.route_options(),
    )
    .await?;

    println!(
        "Route from {} to {} {}:",
        departure.name,
        arrival.name,
        mode.label()
    );
    println!("Travel time: {}", format_duration(summary.duration));
    println!("Distance: {:.1} km", summary.distance / 1000.0);

    Ok(())
}
