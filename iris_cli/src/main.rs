use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{get_matrix::GetMatrixArgs, route::RouteArgs};

mod get_matrix;
mod parsers;
mod route;
mod routing_args;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the travel matrix between every pair of cities
    #[command(visible_alias = "m")]
    Matrix {
        #[command(flatten)]
        args: GetMatrixArgs,
    },
    /// Show the route between two cities
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Matrix { args } => get_matrix::run(args).await?,
        Commands::Route { args } => route::run(args).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_matrix_command() {
        let cli = Cli::try_parse_from([
            "iris",
            "matrix",
            "-i",
            "tests/fixtures/cities.json",
            "--mode",
            "cycling",
            "--option",
            "overview=simplified",
            "--concurrency",
            "4",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Matrix { .. }));
    }

    #[test]
    fn test_parse_route_command_requires_cities() {
        assert!(Cli::try_parse_from(["iris", "route", "-i", "cities.json", "--from", "A"]).is_err());
    }
}
