//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Origin and xref model
//! - Rendering functions for different output formats
//! - Path normalization utilities
//! - Document reading

pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
