/// Diagnostic logging setup.
///
/// Library code emits `tracing` events; the binary installs a stderr
/// subscriber here. Level defaults to INFO and can be overridden per module
/// through `RUST_LOG`, e.g. `RUST_LOG=vrijeme_page::ingest=debug`.

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()?,
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
