use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the per-pixel classification of a sub-iteration is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to classify rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// The pool is built once per thinning call, before the image is touched.
    Fixed(usize),
}

/// Runs row kernels according to an [`ExecutionStrategy`].
pub struct Executor {
    strategy: ExecutionStrategy,
    pool: Option<rayon::ThreadPool>,
}

impl Executor {
    /// Prepare an executor, building the local thread pool if the strategy needs one.
    ///
    /// # Errors
    ///
    /// Returns [`ParallelError`] for a zero thread count or if the pool cannot be built.
    pub fn new(strategy: ExecutionStrategy) -> Result<Self, ParallelError> {
        let pool = match strategy {
            ExecutionStrategy::Fixed(0) => return Err(ParallelError::InvalidThreadCount(0)),
            ExecutionStrategy::Fixed(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?,
            ),
            _ => None,
        };

        Ok(Self { strategy, pool })
    }

    /// The strategy the executor was built for.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Run `f` on every row index in `0..rows` and concatenate what it pushes, in row order.
    pub fn collect_rows<T, F>(&self, rows: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize, &mut Vec<T>) + Sync + Send,
    {
        let par_collect = || {
            (0..rows)
                .into_par_iter()
                .flat_map_iter(|row| {
                    let mut out = Vec::new();
                    f(row, &mut out);
                    out
                })
                .collect::<Vec<T>>()
        };

        match (&self.pool, self.strategy) {
            (_, ExecutionStrategy::Serial) => {
                let mut out = Vec::new();
                for row in 0..rows {
                    f(row, &mut out);
                }
                out
            }
            (Some(pool), _) => pool.install(par_collect),
            (None, _) => par_collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn odd_cells(executor: &Executor) -> Vec<usize> {
        executor.collect_rows(16, |row, out| {
            out.extend((0..4).map(|col| row * 4 + col).filter(|idx| idx % 2 == 1))
        })
    }

    #[test]
    fn test_collect_serial() -> Result<(), ParallelError> {
        let executor = Executor::new(ExecutionStrategy::Serial)?;
        assert_eq!(odd_cells(&executor), (1..64).step_by(2).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_collect_parallel_rows() -> Result<(), ParallelError> {
        let executor = Executor::new(ExecutionStrategy::ParallelRows)?;
        assert_eq!(odd_cells(&executor), (1..64).step_by(2).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_collect_fixed() -> Result<(), ParallelError> {
        let executor = Executor::new(ExecutionStrategy::Fixed(2))?;
        assert_eq!(executor.strategy(), ExecutionStrategy::Fixed(2));
        assert_eq!(odd_cells(&executor), (1..64).step_by(2).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_fixed_zero_threads() {
        let res = Executor::new(ExecutionStrategy::Fixed(0));
        assert!(matches!(res, Err(ParallelError::InvalidThreadCount(0))));
    }

    #[test]
    fn test_collect_no_rows() -> Result<(), ParallelError> {
        let executor = Executor::new(ExecutionStrategy::ParallelRows)?;
        let out: Vec<usize> = executor.collect_rows(0, |row, out| out.push(row));
        assert!(out.is_empty());
        Ok(())
    }
}
