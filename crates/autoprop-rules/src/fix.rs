//! The rewrite: convert a matched property to a getter-only auto-property
//!
//! Three edit groups land as one transaction against a single snapshot:
//! renaming every assignment-target reference of the field, reshaping the
//! property's accessor list (migrating the declarator group's trailing
//! initializer if one exists), and removing the field's declarator. When
//! the candidate no longer resolves against the current tree the fix is a
//! no-op and returns `None`; there is no partially applied state.

use tracing::debug;

use autoprop_core::cst::ast::{
    AccessorList, AstNode, FieldDecl, IdentifierName, PropertyDecl, VariableDeclarator,
};
use autoprop_core::cst::{
    CsSyntaxElement, CsSyntaxKind, CsSyntaxNodeExt, GreenNode, GreenToken, NodeOrToken, TreeEdit,
    apply_edits,
};
use autoprop_core::semantic::SemanticModel;

use crate::detector::PropertyCandidate;
use crate::references::{field_reference_sites, is_assignment_target};

type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Apply the rewrite for `candidate`, returning the new green root, or
/// `None` when the candidate's nodes do not belong to the model's tree
pub fn convert_to_auto_property(
    model: &dyn SemanticModel,
    candidate: &PropertyCandidate,
) -> Option<GreenNode> {
    let root = model.root();
    let property_node = candidate.property_node.syntax();
    let declarator_node = candidate.field_declarator.syntax();
    if &property_node.tree_root() != root || &declarator_node.tree_root() != root {
        debug!("candidate no longer resolves against the current tree; skipping");
        return None;
    }
    let property_name = candidate.property_node.name()?;

    let mut edits = Vec::new();

    // Rename every assignment-target occurrence of the field.
    let sites: Vec<IdentifierName> = field_reference_sites(model, candidate.field)
        .into_iter()
        .filter(is_assignment_target)
        .collect();
    for site in &sites {
        edits.push((
            site.syntax().clone(),
            TreeEdit::Replace(renamed_identifier(site, &property_name)),
        ));
    }

    // Reshape the property, carrying over the first initializer found from
    // the field's own position onward in its declarator group.
    let initializer = trailing_initializer(&candidate.field_declarator);
    edits.push((
        property_node.clone(),
        TreeEdit::Replace(reshaped_property(
            &candidate.property_node,
            initializer.as_ref(),
        )?),
    ));

    // Remove the declarator; the whole statement goes when it is the last.
    let field_decl = candidate.field_declarator.field_decl()?;
    if field_decl.declarators().count() == 1 {
        edits.push((field_decl.syntax().clone(), TreeEdit::Remove));
    } else {
        edits.push((
            field_decl.syntax().clone(),
            TreeEdit::Replace(group_without_declarator(
                &field_decl,
                &candidate.field_declarator,
            )?),
        ));
    }

    debug!(
        property = %property_name,
        renamed = sites.len(),
        "converting property to getter-only auto-property"
    );
    let new_root = apply_edits(root, edits);
    Some(new_root.green().into_owned())
}

/// Replacement identifier carrying the property's name, trivia untouched
fn renamed_identifier(site: &IdentifierName, property_name: &str) -> GreenNode {
    let mut children: Vec<GreenElement> = Vec::new();
    for element in site.syntax().children_with_tokens() {
        match element {
            NodeOrToken::Token(token) if token.kind() == CsSyntaxKind::Ident => {
                children.push(NodeOrToken::Token(GreenToken::new(
                    CsSyntaxKind::Ident.into(),
                    property_name,
                )));
            }
            NodeOrToken::Token(token) => {
                children.push(NodeOrToken::Token(token.green().to_owned()));
            }
            NodeOrToken::Node(node) => {
                children.push(NodeOrToken::Node(node.green().into_owned()));
            }
        }
    }
    GreenNode::new(CsSyntaxKind::IdentifierName.into(), children)
}

/// The first initializer clause at or after the declarator's own position
/// in its group, reused verbatim
fn trailing_initializer(declarator: &VariableDeclarator) -> Option<GreenNode> {
    let field_decl = declarator.field_decl()?;
    field_decl
        .declarators()
        .skip_while(|d| d != declarator)
        .find_map(|d| d.initializer())
        .map(|clause| clause.syntax().green().into_owned())
}

/// The property with its accessor list collapsed to `{ get; }` and the
/// migrated initializer appended as `= <expr>;`
fn reshaped_property(
    property: &PropertyDecl,
    initializer: Option<&GreenNode>,
) -> Option<GreenNode> {
    let accessor_list = property.accessor_list()?;
    let mut children: Vec<GreenElement> = Vec::new();
    for element in property.syntax().children_with_tokens() {
        match element {
            NodeOrToken::Node(node) if node.kind() == CsSyntaxKind::AccessorList => {
                children.push(NodeOrToken::Node(getter_only_accessor_list(&accessor_list)));
                if let Some(initializer) = initializer {
                    children.push(NodeOrToken::Node(initializer.clone()));
                    children.push(NodeOrToken::Token(GreenToken::new(
                        CsSyntaxKind::Semicolon.into(),
                        ";",
                    )));
                }
            }
            NodeOrToken::Node(node) => {
                children.push(NodeOrToken::Node(node.green().into_owned()));
            }
            NodeOrToken::Token(token) => {
                children.push(NodeOrToken::Token(token.green().to_owned()));
            }
        }
    }
    Some(GreenNode::new(CsSyntaxKind::PropertyDecl.into(), children))
}

/// `{ get; }`, keeping the old accessor list's leading trivia
fn getter_only_accessor_list(old: &AccessorList) -> GreenNode {
    let mut children: Vec<GreenElement> = Vec::new();
    for element in old.syntax().children_with_tokens() {
        match element {
            NodeOrToken::Token(token) if token.kind().is_trivia() => {
                children.push(NodeOrToken::Token(token.green().to_owned()));
            }
            _ => break,
        }
    }
    children.push(NodeOrToken::Token(GreenToken::new(
        CsSyntaxKind::LBrace.into(),
        "{",
    )));
    children.push(NodeOrToken::Token(GreenToken::new(
        CsSyntaxKind::Whitespace.into(),
        " ",
    )));
    children.push(NodeOrToken::Node(GreenNode::new(
        CsSyntaxKind::Accessor.into(),
        vec![
            NodeOrToken::Token(GreenToken::new(CsSyntaxKind::GetKw.into(), "get")),
            NodeOrToken::Token(GreenToken::new(CsSyntaxKind::Semicolon.into(), ";")),
        ],
    )));
    children.push(NodeOrToken::Token(GreenToken::new(
        CsSyntaxKind::Whitespace.into(),
        " ",
    )));
    children.push(NodeOrToken::Token(GreenToken::new(
        CsSyntaxKind::RBrace.into(),
        "}",
    )));
    GreenNode::new(CsSyntaxKind::AccessorList.into(), children)
}

/// The declarator group without `target` and its adjacent comma; sibling
/// declarators, their initializers, and their order are untouched
fn group_without_declarator(
    field_decl: &FieldDecl,
    target: &VariableDeclarator,
) -> Option<GreenNode> {
    let elements: Vec<CsSyntaxElement> = field_decl.syntax().children_with_tokens().collect();
    let target_index = elements
        .iter()
        .position(|e| e.as_node() == Some(target.syntax()))?;
    let is_first = !elements[..target_index].iter().any(|e| {
        e.as_node()
            .is_some_and(|n| n.kind() == CsSyntaxKind::VariableDeclarator)
    });
    let comma_index = if is_first {
        elements[target_index + 1..]
            .iter()
            .position(|e| e.as_token().is_some_and(|t| t.kind() == CsSyntaxKind::Comma))
            .map(|offset| offset + target_index + 1)
    } else {
        elements[..target_index]
            .iter()
            .rposition(|e| e.as_token().is_some_and(|t| t.kind() == CsSyntaxKind::Comma))
    };
    let comma_index = comma_index?;

    let low = target_index.min(comma_index);
    let high = target_index.max(comma_index);
    let mut children: Vec<GreenElement> = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        if (low..=high).contains(&index) {
            continue;
        }
        match element {
            NodeOrToken::Node(node) => children.push(NodeOrToken::Node(node.green().into_owned())),
            NodeOrToken::Token(token) => {
                children.push(NodeOrToken::Token(token.green().to_owned()));
            }
        }
    }
    Some(GreenNode::new(CsSyntaxKind::FieldDecl.into(), children))
}
