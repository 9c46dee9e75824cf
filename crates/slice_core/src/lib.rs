//! # slice_core: Foundation types for the slice risk engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! slice_core is the bottom layer of the workspace, providing:
//! - Calendar dates and sampling frequencies (`types::time`, `types::frequency`)
//! - Return series and the backtest adapter boundary (`types::series`)
//! - Date-indexed tables for asset, factor and macro data (`types::table`)
//! - Ordered weight mappings (`types::weights`)
//! - Time-series algebra: compounding, CAGR, volatility, Sharpe, drawdown,
//!   rolling statistics and historical VaR (`math::returns`)
//!
//! Nothing in this crate performs I/O or holds shared state; every routine
//! is a pure function of its (borrowed) inputs.
//!
//! ## Usage Examples
//!
//! ```rust
//! use slice_core::math::returns::{cumulative_return, max_drawdown};
//! use slice_core::types::{Date, Frequency, ReturnSeries, TimeSeriesPoint};
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let points = (0..5)
//!     .map(|i| TimeSeriesPoint::new(start.add_days(i), 0.01))
//!     .collect();
//! let series = ReturnSeries::new("trend", Frequency::Daily, points).unwrap();
//!
//! let total = cumulative_return(&series.values());
//! assert!((total - (1.01_f64.powi(5) - 1.0)).abs() < 1e-12);
//! assert_eq!(max_drawdown(&series.values()), 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for all value types (ISO-8601 dates,
//!   frequency labels, tables as `{columns, rows}`)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
