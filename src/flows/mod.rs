//! Flows module - Resolution and output pipelines
//!
//! scan -> resolve (per page) -> emit (all pages)

pub mod emit;
pub mod generate;
pub mod resolve;
