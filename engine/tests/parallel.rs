use tiletrans_engine::{
    Dimensions, EngineConfig, IterSource, OutputMemory, StoreError, StreamSource, TransposeEngine,
};

/// Counts reads made outside a rayon worker.
struct WorkerSource<S> {
    inner: S,
    off_pool: usize,
}

impl<S: StreamSource<u32>> StreamSource<u32> for WorkerSource<S> {
    fn read(&mut self) -> Option<u32> {
        if rayon::current_thread_index().is_none() {
            self.off_pool += 1;
        }
        self.inner.read()
    }

    fn consumed(&self) -> usize {
        self.inner.consumed()
    }
}

/// Counts bursts written outside a rayon worker.
struct WorkerMemory {
    values: Vec<u32>,
    off_pool: usize,
}

impl OutputMemory<u32> for WorkerMemory {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn write_burst(&mut self, offset: usize, values: &[u32]) -> Result<(), StoreError> {
        if rayon::current_thread_index().is_none() {
            self.off_pool += 1;
        }
        self.values.as_mut_slice().write_burst(offset, values)
    }
}

#[test]
fn loads_and_stores_run_on_the_pool() {
    let dims = Dimensions::new(96, 80);
    let mut engine = TransposeEngine::new(EngineConfig::new(16, 128)).unwrap();
    let mut stream = WorkerSource {
        inner: IterSource::new(0u32..),
        off_pool: 0,
    };
    let mut out = WorkerMemory {
        values: vec![0; dims.len()],
        off_pool: 0,
    };

    let report = engine.transpose(dims, &mut stream, &mut out).unwrap();
    assert_eq!(report.iterations, 7);
    assert_eq!(stream.off_pool, 0);
    assert_eq!(out.off_pool, 0);

    for r in 0..dims.rows {
        for c in 0..dims.cols {
            assert_eq!(out.values[c * dims.rows + r], (r * dims.cols + c) as u32);
        }
    }
}

#[test]
fn repeated_runs_on_the_pool_agree() {
    let dims = Dimensions::new(64, 256);
    let mut engine = TransposeEngine::new(EngineConfig::new(32, 256)).unwrap();
    let mut first = vec![0u32; dims.len()];
    let mut second = vec![0u32; dims.len()];
    engine
        .transpose(dims, &mut IterSource::new(0u32..), first.as_mut_slice())
        .unwrap();
    engine
        .transpose(dims, &mut IterSource::new(0u32..), second.as_mut_slice())
        .unwrap();
    assert_eq!(first, second);
}
