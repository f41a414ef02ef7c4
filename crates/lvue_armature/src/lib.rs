//! # lvue_armature
//!
//! Armature - The tokenizer and tree builder for LVue templates.
//!
//! ## Name Origin
//!
//! An **armature** is the wire skeleton a sculptor builds before any clay is
//! applied. `lvue_armature` builds the bare node skeleton of a template; the
//! directive meaning is modelled on top of it by `lvue_croquis`.
//!
//! ## Architecture
//!
//! ```text
//!   template source
//!        ↓
//! Scanner + match_* (tokenizer)
//!        ↓
//!   TreeBuilder ──on_open/on_close──→ Callbacks
//!        ↓
//!   Arena + roots
//! ```
//!
//! ## Example
//!
//! ```
//! use lvue_armature::parse_html;
//!
//! let output = parse_html("<div><img src=\"a.png\"></div>").unwrap();
//! assert_eq!(output.roots.len(), 1);
//! let div = &output.arena[output.roots[0]];
//! assert_eq!(div.children().len(), 1);
//! ```

pub mod parser;
pub mod tokenizer;

pub use parser::{parse_html, Callbacks, NoopCallbacks, ParseOutput, TreeBuilder};
pub use tokenizer::Scanner;
