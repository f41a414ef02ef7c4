//! Carton - The toolbox for LVue.
//!
//! Foundational data structures and tag tables shared by the LVue template
//! compiler crates, much like a carton (artist's portfolio case) holds the
//! tools every other stage reaches for.
//!
//! # Modules
//!
//! - **Collections**: insertion-ordered fast hash maps used for attribute and
//!   interpolation tables
//! - **Tag config**: the dialect's reserved tag names and literal-content tags
//!
//! # Example
//!
//! ```
//! use lvue_carton::{FxIndexMap, String};
//!
//! let mut attrs: FxIndexMap<String, u32> = FxIndexMap::default();
//! attrs.insert("class".into(), 1);
//! attrs.insert("id".into(), 2);
//! assert_eq!(attrs.keys().next().map(|k| k.as_str()), Some("class"));
//! ```

pub mod tag_config;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;
pub use compact_str::CompactString as String;

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

// Re-export phf for compile-time perfect hash functions
pub use phf::{phf_set, Set as PhfSet};

pub use indexmap::IndexMap;

/// Insertion-ordered map hashed with FxHash.
///
/// Attribute and interpolation tables keep document order so that consumers
/// see them exactly as the author wrote them.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

pub use tag_config::*;
