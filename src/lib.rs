//! Pricing, solving and backtesting of accumulator/decumulator structures.
//!
//! The crate is a transport-agnostic library: callers feed it typed request
//! records (`core::requests`) and market observables, and get typed result
//! records back. The components are pure functions over immutable inputs:
//!
//! * `time::schedule` builds deterministic fixing-date schedules;
//! * `cashflows::payoff` settles a single fixing, shared by simulation and
//!   replay so both price the same economics;
//! * `models::montecarlo` simulates GBM paths with discrete barrier
//!   monitoring and aggregates NPV and knock-out probability;
//! * `solvers::bisection` searches for the zero-NPV strike, barrier or
//!   leverage;
//! * `risk::greeks` produces finite-difference sensitivities and spot
//!   scenarios;
//! * `backtest::replay` replays a realized price series through the same
//!   knock-out/gearing state machine into a day-by-day ledger.

pub mod backtest;
pub mod cashflows;
pub mod core;
pub mod instruments;
pub mod models;
pub mod prelude;
pub mod risk;
pub mod solvers;
pub mod time;
pub mod utils;
