//! # slice_risk (L2: Application)
//!
//! Turns portfolio return series into a structured, reproducible
//! [`RiskReport`](report::RiskReport).
//!
//! This crate provides:
//! - Performance metrics (total return, CAGR, volatility, Sharpe, drawdown,
//!   rolling statistics)
//! - OLS factor regression with t-statistics and p-values
//! - Linear factor scenario analysis
//! - Rule-based risk rails: concentration, correlation clusters, historical
//!   VaR and macro regime warnings
//! - Weighted aggregation of strategy returns into a portfolio
//! - Report orchestration and deterministic text rendering
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             slice_risk (L2)             │
//! ├─────────────────────────────────────────┤
//! │  aggregator/ - strategies -> portfolio  │
//! │  metrics/    - RiskMetrics              │
//! │  factor/     - FactorModel (OLS)        │
//! │  scenarios/  - ScenarioEngine           │
//! │  rails/      - RiskRails                │
//! │  report/     - RiskReportBuilder        │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │             slice_core (L1)             │
//! │  Dates, series, tables, return algebra  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Data Quality Policy
//!
//! Short histories, zero variance and missing optional inputs never raise.
//! They surface in the report as `None`, `0.0` or empty sections. Only
//! contract violations such as a weight naming an unknown asset are errors.
//!
//! ## Example
//!
//! ```
//! use slice_core::types::{BacktestResult, Date, Frequency, ReturnSeries, TimeSeriesPoint, Weights};
//! use slice_risk::aggregator::aggregate_from_backtest;
//! use slice_risk::report::{render_text, RiskReportBuilder};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let strategy = |id: &str, r: f64| {
//!     let points = (0..40)
//!         .map(|i| TimeSeriesPoint::new(start.add_days(i), if i % 3 == 0 { -r } else { r }))
//!         .collect();
//!     ReturnSeries::new(id, Frequency::Daily, points).unwrap()
//! };
//!
//! let backtest = BacktestResult::new(
//!     "bt-001",
//!     Frequency::Daily,
//!     vec![strategy("carry", 0.002), strategy("trend", 0.004)],
//! );
//! let weights = Weights::new([("carry", 0.6), ("trend", 0.4)]).unwrap();
//! let portfolio = aggregate_from_backtest(&backtest, &weights, "book").unwrap();
//!
//! let report = RiskReportBuilder::new(&portfolio).build().unwrap();
//! assert_eq!(report.portfolio.len(), 40);
//! assert!(render_text(&report).contains("Risk Report: book"));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation of reports and all their sections

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod aggregator;
pub mod config;
pub mod error;
pub mod factor;
pub mod metrics;
pub mod rails;
pub mod report;
pub mod scenarios;

pub use config::{RailsConfig, RegimeThresholds, RiskConfig};
pub use error::{RiskError, RiskResult};
pub use report::{RiskReport, RiskReportBuilder};

/// Engine version recorded in report metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
