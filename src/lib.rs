//! Follow Overlap - compare the social graphs of two accounts
//!
//! This library scores how much two accounts' follower and following
//! networks overlap and filters the combined account list by set membership.
//! The engine in [`core`] is pure set algebra; [`services`] holds the HTTP
//! clients and cache that feed it.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Comparer, HandleSet, build_directory, filtered_accounts, intersect_selected, similarity_score};
pub use crate::models::{AccountRecord, CompareRequest, ComparisonReport, FilterSelection, FilterTag, SetKey, UserNetwork};
