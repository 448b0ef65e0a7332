//! Prelude module for convenient imports
//!
//! ```rust
//! use build_core::prelude::*;
//! ```

// Core types
pub use crate::types::{ArmorType, BuildId, SkillExternalId, SourceTag};

// Catalog
pub use crate::catalog::{BuildLoader, BuildSnapshot, Catalog, CatalogLookup};

// Stats engine
pub use crate::stat_block::{compute_build_stats, BuildStatsEngine, BuildStatsError, BuildStatsReport};

// Recommender
pub use crate::recommend::{recommend_build, ScoringWeights};
