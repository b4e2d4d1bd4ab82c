//! Strategy sweeper: backtests one strategy kind across many parameterizations.
//!
//! Each evaluation only reads the shared price series, so evaluations may run
//! on the rayon pool. Selection always walks the results in input order and
//! replaces the incumbent only on a strictly greater fund, so the earliest
//! parameterization wins ties whether or not the sweep ran in parallel.

use crate::domain::backtest::Backtest;
use crate::domain::error::SignalbenchError;
use crate::domain::ohlcv::PriceBar;
use crate::domain::strategy::{Parameterization, SignalSeries, StrategyKind};
use rayon::prelude::*;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub params: Parameterization,
    pub final_fund: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult<S> {
    pub best_params: Parameterization,
    pub final_fund: f64,
    pub best_series: S,
    /// Every evaluation, in input order.
    pub evaluations: Vec<Evaluation>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweeper {
    backtest: Backtest,
    parallel: bool,
}

impl Sweeper {
    pub fn new(backtest: Backtest) -> Self {
        Self {
            backtest,
            parallel: false,
        }
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sweeps an arbitrary indicator function.
    ///
    /// `indicator` maps the base series and one parameterization to a
    /// signal-annotated series; `score` replays that series into a fund.
    pub fn sweep_with<S, F, G>(
        &self,
        bars: &[PriceBar],
        params: &[Parameterization],
        indicator: F,
        score: G,
    ) -> Result<SweepResult<S>, SignalbenchError>
    where
        S: Send,
        F: Fn(&[PriceBar], &Parameterization) -> S + Sync,
        G: Fn(&S, &Backtest) -> f64 + Sync,
    {
        let run = |p: &Parameterization| {
            let series = indicator(bars, p);
            let fund = score(&series, &self.backtest);
            debug!(params = %p, final_fund = fund, "evaluated");
            (*p, fund, series)
        };

        let results: Vec<(Parameterization, f64, S)> = if self.parallel {
            params.par_iter().map(run).collect()
        } else {
            params.iter().map(run).collect()
        };

        let evaluations: Vec<Evaluation> = results
            .iter()
            .map(|(p, fund, _)| Evaluation {
                params: *p,
                final_fund: *fund,
            })
            .collect();

        let mut best: Option<(Parameterization, f64, S)> = None;
        for (p, fund, series) in results {
            let replace = match &best {
                None => true,
                Some((_, best_fund, _)) => fund > *best_fund,
            };
            if replace {
                best = Some((p, fund, series));
            }
        }

        let (best_params, final_fund, best_series) =
            best.ok_or_else(|| SignalbenchError::ConfigInvalid {
                section: "strategies".to_string(),
                key: "sweep".to_string(),
                reason: "at least one parameterization is required".to_string(),
            })?;

        Ok(SweepResult {
            best_params,
            final_fund,
            best_series,
            evaluations,
        })
    }

    /// Sweeps one of the built-in crossover strategies.
    pub fn sweep(
        &self,
        kind: StrategyKind,
        bars: &[PriceBar],
        params: &[Parameterization],
    ) -> Result<SweepResult<SignalSeries>, SignalbenchError> {
        let result = self.sweep_with(
            bars,
            params,
            |b, p| kind.evaluate(b, p),
            |series, bt| series.backtest(bt),
        )?;
        info!(
            strategy = %kind,
            best = %result.best_params,
            final_fund = result.final_fund,
            "sweep complete"
        );
        Ok(result)
    }
}
