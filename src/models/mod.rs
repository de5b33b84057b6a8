pub mod gbm;
pub mod montecarlo;
