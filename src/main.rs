use anyhow::Result;
use bangla_render::cli::{self, Cli};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Route every log::info!() etc. to the temp-dir debug log.
    // --log-level takes precedence over RUST_LOG.
    bangla_render::debug::init_log_bridge(cli.log_level.map(Into::into));

    log::info!("Starting bangla-render {}", bangla_render::VERSION);

    let result = cli::run(cli);
    if let Err(ref e) = result {
        log::error!("bangla-render failed: {e:#}");
    }
    result
}
