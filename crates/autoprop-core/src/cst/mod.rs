//! Concrete Syntax Tree (CST) for the C# subset the engine rewrites
//!
//! A lossless syntax tree built on the Rowan library. The CST preserves
//! all source information including whitespace and comments, which is what
//! makes source-to-source rewrites possible without mangling formatting.
//!
//! Rowan's green/red split gives us:
//!
//! - **Green tree**: immutable, position-independent storage. Cheap to
//!   clone, safe to send across threads, shares identical subtrees.
//! - **Red tree** (`CsSyntaxNode`): an on-demand cursor with parent and
//!   sibling navigation.
//!
//! Trivia is stored as ordinary tokens in the tree, attached before the
//! token they precede, so `tree.text() == source` always holds for trees
//! produced by a well-behaved host.
//!
//! This crate never parses text itself; hosts hand in green trees and the
//! engine produces new green trees via [`edit::apply_edits`].

mod language;
mod nodes;
mod syntax_kind;

pub mod ast;
pub mod edit;

pub use edit::{TreeEdit, apply_edits};
pub use language::CsLanguage;
pub use nodes::*;
pub use syntax_kind::CsSyntaxKind;
