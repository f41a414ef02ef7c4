//! # lvue_croquis
//!
//! Croquis - The directive analysis layer for LVue.
//!
//! ## Name Origin
//!
//! **Croquis** (/kʁɔ.ki/) is a French term for a quick, sketchy drawing that captures
//! the essential features of a subject. `lvue_croquis` sketches the meaning of a
//! template on top of the bare skeleton built by `lvue_armature`.
//!
//! ## Purpose
//!
//! - **Conditional chains**: `v-if` / `v-else-if` / `v-else` with sibling validation
//! - **Iteration**: `v-for` grammar and `ref` placement
//! - **Slots**: outlet names and projection targets
//! - **Raw mode**: `v-pre` subtrees and literal-content tags
//! - **Interpolation**: `{{ expr }}` tokens collected into `data`
//!
//! ## Architecture
//!
//! ```text
//! lvue_armature (Parse)
//!        ↓ on_open / on_close
//!  lvue_croquis (Directive Analysis)  ← This crate
//!        ↓
//!   lvue_relief (AST)
//! ```

pub mod analyzer;
pub mod bindings;
pub mod directives;
pub mod interpolation;
pub mod v_for;

pub use analyzer::{single_root, DirectiveAnalyzer};
pub use bindings::{parse_binding_name, BindingName};
pub use interpolation::extract_interpolations;
pub use v_for::parse_for_expression;
