//! Structural tree edits
//!
//! Edits are keyed by node identity against one tree snapshot and applied
//! in a single rebuild pass that produces a new green root. Subtrees that
//! contain no edit target are reused as-is, so the old and new trees share
//! structure. Either every edit lands or, for an empty edit set, the input
//! root is returned unchanged; there is no partially edited state.

use std::collections::HashMap;

use rowan::NodeOrToken;

use super::{CsSyntaxNode, GreenNode, GreenToken, TextRange};

/// A single edit, addressed at a node of the snapshot being rewritten
#[derive(Debug, Clone)]
pub enum TreeEdit {
    /// Replace the node with a new green subtree
    Replace(GreenNode),
    /// Delete the node together with its trivia
    Remove,
}

/// Apply a set of node edits to `root`, returning the root of the new tree.
///
/// Targets must belong to the tree `root` heads. When edit targets are
/// nested, the outermost edit wins and inner ones are dropped with it.
pub fn apply_edits(root: &CsSyntaxNode, edits: Vec<(CsSyntaxNode, TreeEdit)>) -> CsSyntaxNode {
    if edits.is_empty() {
        return root.clone();
    }
    let ranges: Vec<TextRange> = edits.iter().map(|(node, _)| node.text_range()).collect();
    let map: HashMap<CsSyntaxNode, TreeEdit> = edits.into_iter().collect();
    let green = rebuild(root, &map, &ranges).unwrap_or_else(|| root.green().into_owned());
    CsSyntaxNode::new_root(green)
}

fn rebuild(
    node: &CsSyntaxNode,
    edits: &HashMap<CsSyntaxNode, TreeEdit>,
    ranges: &[TextRange],
) -> Option<GreenNode> {
    match edits.get(node) {
        Some(TreeEdit::Remove) => return None,
        Some(TreeEdit::Replace(green)) => return Some(green.clone()),
        None => {}
    }

    let range = node.text_range();
    if !ranges.iter().any(|target| range.contains_range(*target)) {
        // Nothing to edit below this node; share the existing subtree.
        return Some(node.green().into_owned());
    }

    let mut children: Vec<NodeOrToken<GreenNode, GreenToken>> = Vec::new();
    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(child_node) => {
                if let Some(green) = rebuild(&child_node, edits, ranges) {
                    children.push(NodeOrToken::Node(green));
                }
            }
            NodeOrToken::Token(token) => {
                children.push(NodeOrToken::Token(token.green().to_owned()));
            }
        }
    }
    Some(GreenNode::new(node.kind().into(), children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::{CsSyntaxKind, CsSyntaxNodeExt, GreenNodeBuilder};

    fn ident_list() -> CsSyntaxNode {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(CsSyntaxKind::SourceFile.into());
        for name in ["first", "second", "third"] {
            builder.start_node(CsSyntaxKind::IdentifierName.into());
            builder.token(CsSyntaxKind::Whitespace.into(), " ");
            builder.token(CsSyntaxKind::Ident.into(), name);
            builder.finish_node();
        }
        builder.finish_node();
        CsSyntaxNode::new_root(builder.finish())
    }

    fn ident_green(name: &str) -> GreenNode {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(CsSyntaxKind::IdentifierName.into());
        builder.token(CsSyntaxKind::Whitespace.into(), " ");
        builder.token(CsSyntaxKind::Ident.into(), name);
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn empty_edit_set_returns_input() {
        let root = ident_list();
        let result = apply_edits(&root, Vec::new());
        assert_eq!(result, root);
    }

    #[test]
    fn replace_and_remove_in_one_pass() {
        let root = ident_list();
        let children: Vec<CsSyntaxNode> = root.children().collect();
        let edits = vec![
            (children[0].clone(), TreeEdit::Replace(ident_green("renamed"))),
            (children[2].clone(), TreeEdit::Remove),
        ];
        let result = apply_edits(&root, edits);
        assert_eq!(result.text().to_string(), " renamed second");
    }

    #[test]
    fn untouched_siblings_share_structure() {
        let root = ident_list();
        let children: Vec<CsSyntaxNode> = root.children().collect();
        let edits = vec![(children[0].clone(), TreeEdit::Remove)];
        let result = apply_edits(&root, edits);
        assert_eq!(result.text().to_string(), " second third");
        let second = result.child_of_kind(CsSyntaxKind::IdentifierName).unwrap();
        assert_eq!(second.trimmed_text(), "second");
    }
}
