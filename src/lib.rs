/// vrijeme_page: current DHMZ weather, UV index, and sea temperature for
/// one city, rendered to a static HTML page.
///
/// # Module structure
///
/// ```text
/// vrijeme_page
/// ├── model    — shared data types (Station, Measurements, CurrentReading, FeedError)
/// ├── config   — vrijeme.toml loader (city, feed URLs, template and output paths)
/// ├── logging  — tracing subscriber setup for the binary
/// ├── ingest
/// │   ├── xml      — XML text → ordered FeedNode tree
/// │   ├── feed     — city-grouped / row-based layout detection + station extraction
/// │   └── fixtures (test only) — representative feed payloads
/// ├── analysis
/// │   └── current  — latest non-empty reading + station lookup placeholders
/// ├── report   — per-feed getters and page context assembly
/// └── render   — minijinja page renderer
/// ```

use thiserror::Error;

/// Public modules
pub mod analysis;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod render;
pub mod report;

/// Any failure that ends a run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Feed(#[from] model::FeedError),

    #[error(transparent)]
    Render(#[from] render::RenderError),
}

/// One full run: fetch all feeds, then render and write the page.
///
/// The renderer is built before any fetch so a broken template fails fast,
/// and the page is written only after every feed has been read.
pub fn run(config: &config::AppConfig) -> Result<render::PageContext, AppError> {
    let renderer = render::Renderer::new(&config.output.template_dir, &config.output.template_name)?;
    let client = ingest::build_client(&config.http)?;

    let page = report::collect_page(&client, config)?;
    renderer.write_page(&page, &config.output.path)?;

    Ok(page)
}
