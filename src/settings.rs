//! Configuration of the arithmetic core.

use std::{env, str::FromStr, time::Duration};

use tracing::warn;

use crate::rings::float::{FloatField, DEFAULT_EPSILON};

/// Settings for polynomial arithmetic, passed explicitly to the operations that need them.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// The number of workers used for large multiplications.
    pub n_cores: usize,
    /// The hard maximum on the number of workers of a single multiplication.
    pub max_threads: usize,
    /// Both operands need more terms than this to multiply concurrently.
    pub parallel_threshold: usize,
    /// Floating point coefficients smaller than this in magnitude are zero.
    pub epsilon: f64,
    /// The time budget per worker of a concurrent multiplication.
    pub worker_timeout: Duration,
}

pub const DEFAULT_MAX_THREADS: usize = 64;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 500;
pub const DEFAULT_WORKER_TIMEOUT: Duration = Duration::from_secs(5);

impl Default for Settings {
    fn default() -> Self {
        let n_cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(DEFAULT_MAX_THREADS);

        Self {
            n_cores,
            max_threads: DEFAULT_MAX_THREADS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            epsilon: DEFAULT_EPSILON,
            worker_timeout: DEFAULT_WORKER_TIMEOUT,
        }
    }
}

impl Settings {
    /// Create settings from the defaults, overridden by the environment variables
    /// `GEOPROVE_N_CORES`, `GEOPROVE_MAX_THREADS`, `GEOPROVE_PARALLEL_THRESHOLD`,
    /// `GEOPROVE_EPSILON` and `GEOPROVE_WORKER_TIMEOUT_MS`.
    ///
    /// Values that cannot be parsed are reported and ignored.
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            n_cores: env_or("GEOPROVE_N_CORES", default.n_cores),
            max_threads: env_or("GEOPROVE_MAX_THREADS", default.max_threads),
            parallel_threshold: env_or("GEOPROVE_PARALLEL_THRESHOLD", default.parallel_threshold),
            epsilon: env_or("GEOPROVE_EPSILON", default.epsilon),
            worker_timeout: Duration::from_millis(env_or(
                "GEOPROVE_WORKER_TIMEOUT_MS",
                default.worker_timeout.as_millis() as u64,
            )),
        }
    }

    /// The floating point coefficient field with the configured tolerance.
    pub fn float_field(&self) -> FloatField {
        FloatField::new(self.epsilon)
    }

    /// The total time budget of a concurrent multiplication with `n_workers` workers.
    pub fn timeout_budget(&self, n_workers: usize) -> Duration {
        self.worker_timeout
            .saturating_mul(n_workers.min(u32::MAX as usize) as u32)
    }
}

fn env_or<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(v) => match v.trim().parse() {
            Ok(x) => x,
            Err(_) => {
                warn!("Ignoring unparsable value {:?} of {}", v, name);
                default
            }
        },
        Err(_) => default,
    }
}
