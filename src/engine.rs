//! Evaluation entry point: fan the calculators out over rayon, join every
//! outcome, run the recommender and build the report.

use crate::calculators::{all_calculators, Calculator};
use crate::error::Result;
use crate::recommend::recommend;
use crate::report::build_report;
use crate::types::findings::Findings;
use crate::types::report::{Request, ScoreReport};
use crate::types::score::{ScoreResult, ScoreSystemId};
use rayon::prelude::*;
use std::collections::BTreeMap;

pub struct Engine {
    calculators: Vec<Box<dyn Calculator>>,
    pool: Option<rayon::ThreadPool>,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            calculators: all_calculators(),
            pool: None,
        }
    }
}

/// Evaluate a request on the global rayon pool.
pub fn evaluate(request: &Request) -> Result<ScoreReport> {
    Engine::default().evaluate(request)
}

impl Engine {
    /// Run calculators on a dedicated pool of `workers` threads.
    pub fn with_workers(workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;
        Ok(Self {
            calculators: all_calculators(),
            pool: Some(pool),
        })
    }

    pub fn evaluate(&self, request: &Request) -> Result<ScoreReport> {
        let results = match &self.pool {
            Some(pool) => pool.install(|| self.compute_all(&request.findings)),
            None => self.compute_all(&request.findings),
        };

        let computed = results.values().filter(|r| r.is_computed()).count();
        tracing::info!(
            computed,
            total = results.len(),
            requested = ?request.requested_score,
            locale = request.locale.as_str(),
            "evaluated findings"
        );

        let recommendation = recommend(&request.findings, request.locale);
        build_report(request, results, recommendation)
    }

    /// One task per score system; the collect is the join barrier.
    fn compute_all(&self, findings: &Findings) -> BTreeMap<ScoreSystemId, ScoreResult> {
        self.calculators
            .par_iter()
            .map(|calculator| {
                let result = calculator.compute(findings);
                tracing::debug!(
                    system = %calculator.id(),
                    computed = result.is_computed(),
                    "calculator finished"
                );
                (calculator.id(), result)
            })
            .collect()
    }
}
