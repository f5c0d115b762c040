use clap::Parser;
use tiletrans_engine::Complex;
use tracing::{error, info};
use tracing_forest::ForestLayer;
use tracing_forest::util::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::args::Args;
use crate::error::CliError;
use crate::parsers::ElementOptions;
use crate::run::run_transpose;

mod args;
mod error;
mod parsers;
mod producer;
mod run;

fn main() -> Result<(), CliError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let args = Args::parse();
    let config = args.engine_config()?;
    let dims = args.dimensions();
    info!(
        %dims,
        tile_size = config.tile_size,
        max_cols = config.max_cols,
        remainder = ?config.remainder,
        element = ?args.element,
        "transposing streamed matrix"
    );

    let outcome = match args.element {
        ElementOptions::U32 => run_transpose::<u32>(config, dims, args.pipe_depth),
        ElementOptions::ComplexF32 => run_transpose::<Complex<f32>>(config, dims, args.pipe_depth),
        ElementOptions::ComplexI16 => run_transpose::<Complex<i16>>(config, dims, args.pipe_depth),
    }
    .inspect_err(|err| error!(%err, "FAILED"))?;

    if outcome.mismatches > 0 {
        error!("FAILED");
        return Err(CliError::Verification {
            mismatches: outcome.mismatches,
            total: dims.len(),
        });
    }
    info!(
        iterations = outcome.report.iterations,
        bursts = outcome.report.bursts,
        "PASSED"
    );
    Ok(())
}
