use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::error::{ArithmeticError, ArithmeticResult};
use crate::rings::Ring;
use crate::settings::Settings;

use super::polynomial::Polynomial;
use super::term::Term;
use super::Domain;

impl<F: Ring + Send + Sync + 'static> Polynomial<F>
where
    F::Element: Send + Sync + 'static,
{
    /// Multiply by `p`, using `settings.n_cores` workers when both operands
    /// have more than `settings.parallel_threshold` terms.
    pub fn multiply(&mut self, p: &Self, settings: &Settings) -> ArithmeticResult<&mut Self> {
        if settings.n_cores > 1
            && self.nterms() > settings.parallel_threshold
            && p.nterms() > settings.parallel_threshold
        {
            self.multiply_by_polynomial_concurrently(p, settings.n_cores, settings)
        } else {
            self.multiply_by_polynomial(p)
        }
    }

    /// Multiply by `p` using `n_workers` workers.
    ///
    /// The terms of `self` are split into `n_workers` contiguous blocks. Every worker
    /// multiplies its block by all terms of `p` into a private accumulator, and the
    /// partial products are summed when all workers are done. The result is the same
    /// as that of [`Polynomial::multiply_by_polynomial`].
    ///
    /// If the workers do not finish within `n_workers` times the worker timeout of the
    /// settings, they are cancelled and a [`ArithmeticError::ConcurrencyTimeout`] is
    /// returned. `self` is left untouched in that case.
    pub fn multiply_by_polynomial_concurrently(
        &mut self,
        p: &Self,
        n_workers: usize,
        settings: &Settings,
    ) -> ArithmeticResult<&mut Self> {
        self.multiply_concurrently_with_hook(p, n_workers, settings, None)
    }

    /// The concurrent multiplication, where every worker calls `hook` with its
    /// index before it starts.
    #[instrument(
        level = "trace",
        skip_all,
        fields(lhs = self.nterms(), rhs = p.nterms(), n_workers = n_workers)
    )]
    pub(crate) fn multiply_concurrently_with_hook(
        &mut self,
        p: &Self,
        n_workers: usize,
        settings: &Settings,
        hook: Option<fn(usize)>,
    ) -> ArithmeticResult<&mut Self> {
        ArithmeticError::check_domain(self.domain(), p.domain())?;

        if n_workers == 0 {
            return Err(ArithmeticError::InvalidThreadCount(n_workers));
        }

        let mut n_workers = n_workers;
        if n_workers > settings.max_threads {
            warn!(
                "Requested {} workers, which is more than the maximum of {}",
                n_workers, settings.max_threads
            );
            n_workers = settings.max_threads.max(1);
        }

        if self.is_zero() || p.is_zero() || n_workers == 1 {
            self.mul_serial(p)?;
            return Ok(self);
        }

        // read-only snapshots shared by all workers
        let lhs: Arc<Vec<Term<F>>> = Arc::new(self.terms_desc().collect());
        let rhs: Arc<Vec<Term<F>>> = Arc::new(p.terms_desc().collect());
        n_workers = n_workers.min(lhs.len());
        debug!(
            "Splitting {} x {} terms over {} workers",
            lhs.len(),
            rhs.len(),
            n_workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n_workers)
            .thread_name(|i| format!("geoprove-mul-{}", i))
            .build()?;

        let cancelled = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        for worker in 0..n_workers {
            let (lhs, rhs, tx, cancelled) =
                (lhs.clone(), rhs.clone(), tx.clone(), cancelled.clone());
            let (field, domain) = (*self.field(), self.domain());

            pool.spawn(move || {
                let expanded = panic::catch_unwind(AssertUnwindSafe(|| {
                    if let Some(hook) = hook {
                        hook(worker);
                    }

                    let start = worker * lhs.len() / n_workers;
                    let end = (worker + 1) * lhs.len() / n_workers;
                    expand_block(&field, domain, &lhs[start..end], &rhs, &cancelled)
                }));

                let result = match expanded {
                    Ok(Ok(Some(acc))) => Ok(acc),
                    Ok(Ok(None)) => return,
                    Ok(Err(e)) => Err(e),
                    Err(_) => Err(ArithmeticError::WorkerFailed(worker)),
                };

                // the receiver is gone if the multiplication was aborted
                let _ = tx.send((worker, result));
            });
        }
        drop(tx);

        let budget = settings.timeout_budget(n_workers);
        let deadline = Instant::now() + budget;

        let mut partials = Vec::with_capacity(n_workers);
        while partials.len() < n_workers {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((worker, Ok(acc))) => {
                    debug!("Worker {} produced {} terms", worker, acc.nterms());
                    partials.push(acc);
                }
                Ok((worker, Err(e))) => {
                    cancelled.store(true, Ordering::Relaxed);
                    warn!("Worker {} failed: {}", worker, e);
                    return Err(e);
                }
                Err(RecvTimeoutError::Timeout) => {
                    cancelled.store(true, Ordering::Relaxed);
                    warn!(
                        "Multiplication with {} workers timed out after {:?}",
                        n_workers, budget
                    );
                    return Err(ArithmeticError::ConcurrencyTimeout(budget));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    cancelled.store(true, Ordering::Relaxed);
                    return Err(ArithmeticError::WorkersDisconnected);
                }
            }
        }

        debug!("Merging {} partial products", partials.len());

        // sum the partial products pairwise
        while partials.len() > 1 {
            let mut next = Vec::with_capacity((partials.len() + 1) / 2);
            let mut it = partials.into_iter();
            while let Some(mut a) = it.next() {
                if let Some(b) = it.next() {
                    a.add_polynomial(&b)?;
                }
                next.push(a);
            }
            partials = next;
        }

        if let Some(r) = partials.pop() {
            *self = r;
        }
        Ok(self)
    }
}

/// Expand the products of a block of left-hand terms with all right-hand terms into
/// a private accumulator. Returns `None` if the multiplication was cancelled.
fn expand_block<F: Ring>(
    field: &F,
    domain: Domain,
    lhs: &[Term<F>],
    rhs: &[Term<F>],
    cancelled: &AtomicBool,
) -> ArithmeticResult<Option<Polynomial<F>>> {
    let mut acc = Polynomial::new(field, domain);
    for a in lhs {
        if cancelled.load(Ordering::Relaxed) {
            return Ok(None);
        }

        for b in rhs {
            acc.add_monomial_product(a.monomial(), &a.coefficient, b.monomial(), &b.coefficient)?;
        }
    }
    Ok(Some(acc))
}
