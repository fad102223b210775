//! Eligibility detection for the backing-field property pattern
//!
//! A property qualifies when it is an instance member with only a getter,
//! the getter's explicit body is exactly `return <field>;` (bare or
//! `this`-qualified), and the field is an immutable, non-visible member of
//! the same type with the exact same declared type. Detection is a pure
//! read; diagnostics are recomputed from the live tree on every pass.

use autoprop_core::cst::CsSyntaxKind;
use autoprop_core::cst::ast::{
    AstNode, IdentifierName, MemberAccessExpr, PropertyDecl, ReturnStmt, VariableDeclarator,
};
use autoprop_core::cst::CsSyntaxNode;
use autoprop_core::config::LintConfig;
use autoprop_core::diagnostics::{Diagnostic, RuleCategory, RuleDescriptor, Severity};
use autoprop_core::semantic::{SemanticModel, SymbolId, SymbolKind};

use crate::references::{field_reference_sites, is_assignment_target};

/// Stable identifier of the rule
pub const RULE_ID: &str = "simplification/use-auto-property";

pub const RULE: RuleDescriptor = RuleDescriptor {
    id: RULE_ID,
    description: "Properties whose getter only forwards a private readonly backing field \
                  can become getter-only auto-properties",
    category: RuleCategory::Simplification,
    severity: Severity::Info,
};

/// Name of the code action offered for each diagnostic
pub const FIX_TITLE: &str = "Convert to getter-only auto-property";

/// A matched (property, backing field) pair
///
/// Consumed exactly once by the fix; the referenced nodes are only valid
/// against the tree snapshot the producing model was bound to.
#[derive(Debug, Clone)]
pub struct PropertyCandidate {
    pub property: SymbolId,
    pub property_node: PropertyDecl,
    pub field: SymbolId,
    pub field_declarator: VariableDeclarator,
}

/// Run the detector over the whole tree and report one diagnostic per
/// candidate, anchored at the property name token, in declaration order
pub fn check_use_auto_property(model: &dyn SemanticModel, config: &LintConfig) -> Vec<Diagnostic> {
    let Some(severity) = config.effective_severity(RULE.id, RULE.severity) else {
        return Vec::new();
    };

    let mut diagnostics = Vec::new();
    for property in model.root().descendants().filter_map(PropertyDecl::cast) {
        if detect(model, &property).is_none() {
            continue;
        }
        let Some(name_token) = property.name_token() else {
            continue;
        };
        diagnostics.push(Diagnostic::new(
            RULE.id,
            severity,
            RULE.category,
            format!(
                "Property '{}' can be converted to a getter-only auto-property",
                name_token.text()
            ),
            name_token.text_range().into(),
            name_token.text().to_string(),
        ));
    }
    diagnostics
}

/// Decide whether `property` matches the pattern and pair it with its
/// backing field
pub fn detect(model: &dyn SemanticModel, property: &PropertyDecl) -> Option<PropertyCandidate> {
    let property_id = model.declared_symbol(property.syntax())?;
    let property_symbol = model.symbol(property_id)?;
    if property_symbol.kind != SymbolKind::Property
        || property_symbol.is_static
        || !property_symbol.has_getter
        || property_symbol.has_setter
    {
        return None;
    }

    // The getter needs an explicit body with exactly one statement. An
    // auto-property accessor has no body, so the rule cannot re-fire on
    // the rewrite's own output.
    let getter = property.accessor_list()?.getter()?;
    let body = getter.body()?;
    let mut statements = body.statements();
    let only_statement = statements.next()?;
    if statements.next().is_some() {
        return None;
    }
    let returned = ReturnStmt::cast(only_statement)?.expression()?;
    let name_node = returned_field_name(&returned)?;

    let field_id = model.resolve_reference(name_node.syntax())?;
    let field = model.symbol(field_id)?;
    if field.kind != SymbolKind::Field
        || !field.is_readonly
        || !field.is_private_or_default()
        || field.container.is_none()
        || field.container != property_symbol.container
    {
        return None;
    }
    let (Some(field_ty), Some(property_ty)) = (field.ty, property_symbol.ty) else {
        return None;
    };
    if !model.types_equal(field_ty, property_ty) {
        return None;
    }

    // Any read that is not an assignment target would dangle once the
    // field is deleted. Reads inside this getter disappear with the
    // rewrite and are exempt.
    let body_range = body.syntax().text_range();
    for site in field_reference_sites(model, field_id) {
        if !is_assignment_target(&site) && !body_range.contains_range(site.syntax().text_range())
        {
            return None;
        }
    }

    let field_declarator = VariableDeclarator::cast(field.declaration.clone())?;
    Some(PropertyCandidate {
        property: property_id,
        property_node: property.clone(),
        field: field_id,
        field_declarator,
    })
}

/// The field named by a trivial getter return: a bare identifier or a
/// `this.<identifier>` member access
fn returned_field_name(expression: &CsSyntaxNode) -> Option<IdentifierName> {
    match expression.kind() {
        CsSyntaxKind::IdentifierName => IdentifierName::cast(expression.clone()),
        CsSyntaxKind::MemberAccessExpr => {
            let access = MemberAccessExpr::cast(expression.clone())?;
            if access.receiver()?.kind() != CsSyntaxKind::ThisExpr {
                return None;
            }
            access.name()
        }
        _ => None,
    }
}
