use std::thread;

use tiletrans_engine::{Dimensions, EngineConfig, TransposeEngine, TransposeReport};
use tracing::{info, info_span, warn};

use crate::error::CliError;
use crate::producer::{TestPattern, pipe, produce};

/// Result of a verified run.
#[derive(Debug)]
pub struct Outcome {
    pub report: TransposeReport,
    pub mismatches: usize,
}

/// Streams the pattern matrix from a producer thread through the engine and checks every output
/// element against its expected transposed position.
pub fn run_transpose<E: TestPattern>(
    config: EngineConfig,
    dims: Dimensions,
    pipe_depth: usize,
) -> Result<Outcome, CliError> {
    let mut engine = TransposeEngine::<E>::new(config)?;
    config.validate(dims)?;
    if dims.len() as u64 > E::DISTINCT {
        return Err(CliError::PatternTooSmall {
            elements: dims.len(),
            limit: E::DISTINCT,
            format: core::any::type_name::<E>(),
        });
    }
    let mut out = vec![E::default(); dims.len()];

    let report = info_span!("stream transpose", %dims, pipe_depth).in_scope(|| {
        let (tx, mut source) = pipe(pipe_depth);
        thread::scope(|s| {
            s.spawn(move || produce::<E>(tx, dims.len()));
            // The source is dropped before the scope joins, which releases a producer still
            // blocked on a full pipe.
            let result = engine.transpose(dims, &mut source, out.as_mut_slice());
            drop(source);
            result
        })
    })?;

    let mismatches = info_span!("verify output").in_scope(|| count_mismatches(dims, &out));
    if mismatches > 0 {
        warn!(mismatches, "output differs from the transposed pattern");
    } else {
        info!(bursts = report.bursts, tiles = report.tiles, "output verified");
    }
    Ok(Outcome { report, mismatches })
}

/// Number of positions where `out` does not hold the transpose of the pattern matrix.
pub fn count_mismatches<E: TestPattern>(dims: Dimensions, out: &[E]) -> usize {
    (0..dims.cols)
        .flat_map(|c| (0..dims.rows).map(move |r| (r, c)))
        .filter(|&(r, c)| out[c * dims.rows + r] != E::at(r * dims.cols + c))
        .count()
}
