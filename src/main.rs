//! Weather Page Builder
//!
//! Fetches the DHMZ general weather, UV index, and sea temperature feeds,
//! picks the current reading for the configured city, and writes a static
//! HTML page.
//!
//! Usage:
//!   cargo run --release
//!
//! Configuration:
//!   vrijeme.toml   - city, feed URLs, template and output paths (optional)
//!   VRIJEME_CONFIG - alternative path to the config file
//!   VRIJEME_CITY   - override the configured city
//!   RUST_LOG       - log filter (default: info)

use vrijeme_page::config;
use vrijeme_page::logging;

fn main() {
    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Configuration error: {}\n", e);
            std::process::exit(1);
        }
    };

    println!("🌤  Weather page for {}", config.city);
    println!("   Output: {}", config.output.path.display());

    match vrijeme_page::run(&config) {
        Ok(page) => {
            println!("✓ {} {}h - UV {} ({}), sea {} ({})",
                page.date, page.read_time,
                page.uv_index, page.uv_read_time,
                page.sea_temp, page.sea_read_time);
        }
        Err(e) => {
            eprintln!("\n❌ Run failed: {}\n", e);
            std::process::exit(1);
        }
    }
}
