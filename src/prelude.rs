pub use crate::{
    backtest::replay::{replay, run_simulation},
    cashflows::payoff::{effective_leverage, evaluate_fixing, FixingPayoff},
    core::market::{MarketState, CALENDAR_DAYS_PER_YEAR, TRADING_DAYS_PER_YEAR},
    core::marketdata::{ClosePrice, InMemoryProvider, MarketDataProvider, OhlcBar},
    core::requests::{SimulationRequest, SolveRequest, ValuationRequest},
    core::results::{
        BacktestResult, BacktestStatus, BacktestSummary, FixingRecord, Greeks, PricingResult,
        RiskReport, ScenarioPnl, SolverResult,
    },
    instruments::contract::{ContractTerms, ProductType},
    instruments::structure::{build_structure, FixingLeg, LegSide, OptionKind, OptionLeg},
    models::gbm::GbmProcess,
    models::montecarlo::{MonteCarloPricer, DEFAULT_NUM_SIMULATIONS, SOLVER_NUM_SIMULATIONS},
    risk::greeks::{compute_risk, compute_risk_with, SPOT_SHOCKS_PCT},
    solvers::bisection::{solve, SolveTarget, MAX_ITERATIONS},
    time::schedule::{generate_schedule, Frequency},
    utils::errors::{AccumError, Result},
};
