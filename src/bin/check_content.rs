// Content Check
//
// Purpose: Validate every record in a data directory and list the pages a
// static build would emit. Exits non-zero on any invalid or duplicate record.
// Usage: cargo run --bin check_content [DATA_DIR]

use std::path::PathBuf;
use std::process::ExitCode;

use humanmachine_catalog::{CatalogConfig, LoadPolicy, SiteCatalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "humanmachine_catalog=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let data_dir = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => match CatalogConfig::from_env() {
            Ok(config) => config.data_dir,
            Err(e) => {
                eprintln!("error: {:#}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    // Always collect everything so one run reports every problem
    let site = match SiteCatalog::load_from_dir(&data_dir, LoadPolicy::CollectAll) {
        Ok(site) => site,
        Err(e) => {
            // Each invalid record has already been logged by the loader
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let routes = site.static_routes();
    for route in &routes {
        println!("{}", route);
    }
    eprintln!(
        "{} interviews, {} work, {} play: {} pages",
        site.interviews().len(),
        site.work().len(),
        site.play().len(),
        routes.len()
    );

    ExitCode::SUCCESS
}
