pub mod contract;
pub mod structure;
