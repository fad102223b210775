//! Field reference collection
//!
//! Shared between the detector (which must prove that deleting the field
//! leaves nothing dangling) and the fix (which renames the assignment
//! targets).

use autoprop_core::cst::CsSyntaxKind;
use autoprop_core::cst::ast::{AssignmentExpr, AstNode, IdentifierName, MemberAccessExpr};
use autoprop_core::semantic::{SemanticModel, SymbolId};

/// All identifier occurrences resolving to `field`, across every declaring
/// part of its containing type
pub(crate) fn field_reference_sites(
    model: &dyn SemanticModel,
    field: SymbolId,
) -> Vec<IdentifierName> {
    let Some(symbol) = model.symbol(field) else {
        return Vec::new();
    };
    let Some(container) = symbol.container else {
        return Vec::new();
    };
    let name = symbol.name.clone();

    let mut sites = Vec::new();
    for part in model.declaring_nodes(container) {
        for candidate in part.descendants().filter_map(IdentifierName::cast) {
            if candidate.text() != name {
                continue;
            }
            if model.resolve_reference(candidate.syntax()) == Some(field) {
                sites.push(candidate);
            }
        }
    }
    sites
}

/// Whether the occurrence is the target of a simple assignment, either
/// bare (`field = …`) or through one member access (`this.field = …`)
pub(crate) fn is_assignment_target(name: &IdentifierName) -> bool {
    let mut expr = name.syntax().clone();
    if let Some(parent) = expr.parent()
        && parent.kind() == CsSyntaxKind::MemberAccessExpr
        && MemberAccessExpr::cast(parent.clone())
            .and_then(|access| access.name())
            .is_some_and(|n| n.syntax() == name.syntax())
    {
        expr = parent;
    }
    match expr.parent() {
        Some(parent) if parent.kind() == CsSyntaxKind::AssignmentExpr => {
            AssignmentExpr::cast(parent)
                .and_then(|assignment| assignment.left())
                .is_some_and(|left| left == expr)
        }
        _ => false,
    }
}
