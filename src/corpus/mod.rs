//! Corpus module - Collect anchor registrations and rewrite rules per page

pub mod bundle;
pub mod index;
pub mod rewrites;
pub mod walk;
