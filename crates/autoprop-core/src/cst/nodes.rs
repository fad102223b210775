//! Type aliases and helpers for C# CST nodes
//!
//! Built on top of Rowan's generic tree types, parameterized with
//! `CsLanguage`. The green tree is the persistent, position-independent
//! storage shared between snapshots; red nodes are cheap cursors created
//! on demand.

use super::{CsLanguage, CsSyntaxKind};

/// A node in the C# concrete syntax tree
pub type CsSyntaxNode = rowan::SyntaxNode<CsLanguage>;

/// A token (leaf) in the C# concrete syntax tree
pub type CsSyntaxToken = rowan::SyntaxToken<CsLanguage>;

/// Either a node or a token
pub type CsSyntaxElement = rowan::SyntaxElement<CsLanguage>;

// Re-export the rowan types the rest of the workspace needs, so that only
// this crate carries the direct dependency.
pub use rowan::{
    Direction, GreenNode, GreenNodeBuilder, GreenToken, NodeOrToken, TextRange, TextSize,
    WalkEvent,
};

/// Extension helpers for `CsSyntaxNode`
pub trait CsSyntaxNodeExt {
    /// Find the first direct child node of a specific kind
    fn child_of_kind(&self, kind: CsSyntaxKind) -> Option<CsSyntaxNode>;

    /// Find the first direct child token of a specific kind
    fn token_of_kind(&self, kind: CsSyntaxKind) -> Option<CsSyntaxToken>;

    /// Whether a direct child token of the given kind exists
    fn has_token(&self, kind: CsSyntaxKind) -> bool;

    /// The root of the tree this node belongs to
    fn tree_root(&self) -> CsSyntaxNode;

    /// Text content with surrounding trivia stripped
    fn trimmed_text(&self) -> String;
}

impl CsSyntaxNodeExt for CsSyntaxNode {
    fn child_of_kind(&self, kind: CsSyntaxKind) -> Option<CsSyntaxNode> {
        self.children().find(|child| child.kind() == kind)
    }

    fn token_of_kind(&self, kind: CsSyntaxKind) -> Option<CsSyntaxToken> {
        self.children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == kind)
    }

    fn has_token(&self, kind: CsSyntaxKind) -> bool {
        self.token_of_kind(kind).is_some()
    }

    fn tree_root(&self) -> CsSyntaxNode {
        self.ancestors().last().unwrap_or_else(|| self.clone())
    }

    fn trimmed_text(&self) -> String {
        self.text().to_string().trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_tree() -> CsSyntaxNode {
        let mut builder = GreenNodeBuilder::new();

        builder.start_node(CsSyntaxKind::FieldDecl.into());
        builder.token(CsSyntaxKind::ReadonlyKw.into(), "readonly");
        builder.token(CsSyntaxKind::Whitespace.into(), " ");
        builder.token(CsSyntaxKind::Ident.into(), "_value");
        builder.token(CsSyntaxKind::Semicolon.into(), ";");
        builder.finish_node();

        CsSyntaxNode::new_root(builder.finish())
    }

    #[test]
    fn text_is_lossless() {
        let tree = build_test_tree();
        assert_eq!(tree.text().to_string(), "readonly _value;");
    }

    #[test]
    fn token_lookup() {
        let tree = build_test_tree();
        assert!(tree.has_token(CsSyntaxKind::ReadonlyKw));
        let ident = tree.token_of_kind(CsSyntaxKind::Ident).unwrap();
        assert_eq!(ident.text(), "_value");
    }

    #[test]
    fn trivia_classification() {
        let tree = build_test_tree();
        let ws = tree.token_of_kind(CsSyntaxKind::Whitespace).unwrap();
        assert!(ws.kind().is_trivia());
        let kw = tree.token_of_kind(CsSyntaxKind::ReadonlyKw).unwrap();
        assert!(!kw.kind().is_trivia());
    }
}
