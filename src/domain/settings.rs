//! Resolved run settings, built from a validated configuration.

use crate::domain::backtest::Backtest;
use crate::domain::config_validation::{
    read_bollinger, read_data_dir, read_dates, read_fund, read_interval, read_kinds, read_mfi,
    read_parallel, read_roc_period, read_rsi, read_stochastic, read_sweep, read_ticker,
};
use crate::domain::error::SignalbenchError;
use crate::domain::indicator::{BollingerParams, MfiParams, RsiParams, StochasticParams};
use crate::domain::strategy::{Parameterization, StrategyKind};
use crate::domain::sweep::Sweeper;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorSettings {
    pub rsi: RsiParams,
    pub mfi: MfiParams,
    pub stochastic: StochasticParams,
    pub roc_period: usize,
    pub bollinger: BollingerParams,
}

impl Default for OscillatorSettings {
    fn default() -> Self {
        OscillatorSettings {
            rsi: RsiParams::default(),
            mfi: MfiParams::default(),
            stochastic: StochasticParams::default(),
            roc_period: crate::domain::indicator::roc::DEFAULT_PERIOD,
            bollinger: BollingerParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub fund: f64,
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interval: String,
    pub kinds: Vec<StrategyKind>,
    pub sweep: Vec<Parameterization>,
    pub parallel: bool,
    pub oscillators: OscillatorSettings,
    pub data_dir: PathBuf,
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, SignalbenchError> {
        let (start_date, end_date) = read_dates(config)?;
        Ok(Settings {
            fund: read_fund(config)?,
            ticker: read_ticker(config)?,
            start_date,
            end_date,
            interval: read_interval(config)?,
            kinds: read_kinds(config)?,
            sweep: read_sweep(config)?,
            parallel: read_parallel(config)?,
            oscillators: OscillatorSettings {
                rsi: read_rsi(config)?,
                mfi: read_mfi(config)?,
                stochastic: read_stochastic(config)?,
                roc_period: read_roc_period(config)?,
                bollinger: read_bollinger(config)?,
            },
            data_dir: read_data_dir(config),
        })
    }

    pub fn backtest(&self) -> Backtest {
        Backtest::new(self.fund)
    }

    pub fn sweeper(&self) -> Sweeper {
        Sweeper::new(self.backtest()).with_parallelism(self.parallel)
    }
}
