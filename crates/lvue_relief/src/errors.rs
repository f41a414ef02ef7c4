//! Compiler errors.
//!
//! Every error is fatal: the first one raised aborts the compile call.

use std::fmt;

use lvue_carton::String;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::location::Position;

/// Which compiler layer rejected the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Tokenizer: malformed tags, attributes or stray content
    Syntax,
    /// Directive analysis: conditional chains, v-for grammar, ref placement
    Semantic,
    /// Driver: root node count
    Structural,
}

/// Error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ErrorCode {
    IllegalTemplate = 0,
    RootNodeCount = 1,
    IllegalRef = 2,
    IllegalForExpression = 3,
    ElseWithoutIf = 4,
    ElseIfWithoutIf = 5,
}

impl ErrorCode {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IllegalTemplate => ErrorKind::Syntax,
            Self::RootNodeCount => ErrorKind::Structural,
            Self::IllegalRef
            | Self::IllegalForExpression
            | Self::ElseWithoutIf
            | Self::ElseIfWithoutIf => ErrorKind::Semantic,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::IllegalTemplate => "Template string is illegal.",
            Self::RootNodeCount => "Template must have exactly one root node.",
            Self::IllegalRef => "ref is not allowed inside v-for or on <template>.",
            Self::IllegalForExpression => "v-for expression is illegal.",
            Self::ElseWithoutIf => "v-else has no adjacent v-if or v-else-if.",
            Self::ElseIfWithoutIf => "v-else-if has no adjacent v-if or v-else-if.",
        }
    }
}

/// What the tokenizer could not make sense of
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxReason {
    /// Something other than an attribute, `>` or `/>` inside a start tag
    MalformedAttribute,
    /// Input ended inside a start tag
    UnterminatedTag { tag: String },
    /// `</tag>` with no open `<tag>` to close
    UnmatchedEndTag { tag: String },
    /// Text with no element on the stack to own it
    StrayText,
    /// Content that is neither markup nor text
    UnexpectedContent,
}

impl fmt::Display for SyntaxReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedAttribute => f.write_str("malformed attribute"),
            Self::UnterminatedTag { tag } => write!(f, "unterminated <{tag}> tag"),
            Self::UnmatchedEndTag { tag } => write!(f, "unmatched </{tag}>"),
            Self::StrayText => f.write_str("text outside of any element"),
            Self::UnexpectedContent => f.write_str("unexpected content"),
        }
    }
}

/// Compiler error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilerError {
    #[error("template string is illegal: {reason} at {position}")]
    IllegalTemplate {
        reason: SyntaxReason,
        position: Position,
    },

    #[error(
        "template must have exactly one root node, but this template has {count} root node(s); wrap it in a single element"
    )]
    RootNodeCount { count: usize },

    #[error(
        "{tag} element cannot have a ref attribute inside an element with v-for or on a template element"
    )]
    IllegalRef { tag: String, position: Position },

    #[error(
        "The v-for expression `{expression}` in {tag} element is illegal, expected `alias in|of collection`"
    )]
    IllegalForExpression {
        tag: String,
        expression: String,
        position: Position,
    },

    #[error(
        "{tag} element's v-else must follow a sibling with a v-if or v-else-if condition, but {previous} element is illegal!"
    )]
    ElseWithoutIf {
        tag: String,
        /// Previous sibling's tag, or `as the first child`
        previous: String,
        position: Position,
    },

    #[error(
        "{tag} element's v-else-if must follow a sibling with a v-if or v-else-if condition, but {previous} element is illegal!"
    )]
    ElseIfWithoutIf {
        tag: String,
        /// Previous sibling's tag, or `as the first child`
        previous: String,
        position: Position,
    },
}

impl CompilerError {
    pub fn illegal(reason: SyntaxReason, position: Position) -> Self {
        Self::IllegalTemplate { reason, position }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::IllegalTemplate { .. } => ErrorCode::IllegalTemplate,
            Self::RootNodeCount { .. } => ErrorCode::RootNodeCount,
            Self::IllegalRef { .. } => ErrorCode::IllegalRef,
            Self::IllegalForExpression { .. } => ErrorCode::IllegalForExpression,
            Self::ElseWithoutIf { .. } => ErrorCode::ElseWithoutIf,
            Self::ElseIfWithoutIf { .. } => ErrorCode::ElseIfWithoutIf,
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// Where the offending construct starts
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::IllegalTemplate { position, .. }
            | Self::IllegalRef { position, .. }
            | Self::IllegalForExpression { position, .. }
            | Self::ElseWithoutIf { position, .. }
            | Self::ElseIfWithoutIf { position, .. } => Some(*position),
            Self::RootNodeCount { .. } => None,
        }
    }
}
