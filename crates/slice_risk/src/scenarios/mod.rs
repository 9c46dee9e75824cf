//! Scenario shocks and their propagation through the factor model.
//!
//! - `ScenarioShock`: move of a single factor
//! - `ScenarioConfig`: named set of shocks
//! - `ScenarioEngine`: beta-weighted P&L per scenario

mod engine;
mod shocks;

pub use engine::{run_scenarios, ScenarioEngine, ScenarioResult};
pub use shocks::{ScenarioConfig, ScenarioShock};
