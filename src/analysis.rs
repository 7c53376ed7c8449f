//! Analysis passes over a loaded `Table`
//!
//! Each submodule computes one category of statistic. Passes are independent
//! and never modify the table.

pub mod barcode;
pub mod categorical;
pub mod consistency;
pub mod distribution;
pub mod duplicates;
mod frequencies;
pub mod missing;
pub mod temporal;

pub use frequencies::Frequencies;
