use clap::Parser;
use tracing::{error, info};

use song_seeder::{logging, parse_error_exit_code, SeederConfig};

#[tokio::main]
async fn main() {
    // Load .env before parsing so its values act as env fallbacks.
    dotenv::dotenv().ok();

    let config = match SeederConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_error_exit_code(&e));
        }
    };
    logging::init(config.log_format);

    match song_seeder::run(&config).await {
        Ok(report) => {
            info!(
                succeeded = report.succeeded,
                failed = report.failed,
                "Indexed {} documents",
                report.succeeded
            );
        }
        Err(e) => {
            error!(error = %e, "Seeding failed");
            std::process::exit(1);
        }
    }
}
