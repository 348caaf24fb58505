// Core algorithm exports
pub mod comparer;
pub mod directory;
pub mod filters;
pub mod scoring;
pub mod sets;
pub mod stats;

pub use comparer::{Comparer, Comparison};
pub use directory::build_directory;
pub use filters::{filtered_accounts, filtered_accounts_with_policy, intersect_selected, select_sets, user_filter_set};
pub use scoring::{similarity_message, similarity_score};
pub use sets::HandleSet;
pub use stats::{venn_regions, NetworkStats, VennRegion};
