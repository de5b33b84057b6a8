pub mod market;
pub mod marketdata;
pub mod requests;
pub mod results;
