//! URL handling module for linkcrawl
//!
//! This module validates seed addresses, decides which links found on a page
//! are worth following, and resolves them into the normalized addresses the
//! crawler deduplicates on.

mod normalize;
mod policy;

// Re-export main functions
pub use normalize::{parse_seed, unify_url};
pub use policy::{is_relative_link, LinkPolicy};
