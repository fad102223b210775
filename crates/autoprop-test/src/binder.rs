//! Semantic binder for the C# subset
//!
//! Implements the `SemanticAnalyzer`/`SemanticModel` facade the engine is
//! written against. Resolution rules are deliberately small but honest:
//! parameters shadow members, `this.` qualification bypasses that
//! shadowing, type identity is exact (interned from normalized type text),
//! and partial type declarations with the same name merge into one symbol
//! with several declaring parts.

use std::collections::HashMap;

use autoprop_core::cst::ast::{
    AstNode, CtorDecl, IdentifierName, MemberAccessExpr, MethodDecl, SourceFile, TypeDecl,
};
use autoprop_core::cst::{CsSyntaxKind, CsSyntaxNode};
use autoprop_core::semantic::{
    Accessibility, SemanticAnalyzer, SemanticModel, Symbol, SymbolId, SymbolKind, TypeId,
};

/// Binder used by the test suites in place of a real compiler host
#[derive(Debug, Clone, Copy, Default)]
pub struct TestAnalyzer;

impl SemanticAnalyzer for TestAnalyzer {
    fn analyze(&self, root: &CsSyntaxNode) -> Box<dyn SemanticModel> {
        Box::new(TestModel::bind(root.clone()))
    }
}

struct TestModel {
    root: CsSyntaxNode,
    symbols: Vec<Symbol>,
    declarations: HashMap<CsSyntaxNode, SymbolId>,
    members: HashMap<(SymbolId, String), SymbolId>,
    parts: HashMap<SymbolId, Vec<CsSyntaxNode>>,
}

impl TestModel {
    fn bind(root: CsSyntaxNode) -> Self {
        let mut model = Self {
            root: root.clone(),
            symbols: Vec::new(),
            declarations: HashMap::new(),
            members: HashMap::new(),
            parts: HashMap::new(),
        };
        let mut types_by_name: HashMap<String, SymbolId> = HashMap::new();
        let mut type_ids: HashMap<String, TypeId> = HashMap::new();

        let Some(file) = SourceFile::cast(root) else {
            return model;
        };
        for type_decl in file.types() {
            let Some(type_name) = type_decl.name() else {
                continue;
            };
            let type_id = *types_by_name.entry(type_name.clone()).or_insert_with(|| {
                model.push_symbol(Symbol {
                    kind: SymbolKind::Type,
                    name: type_name.clone(),
                    container: None,
                    ty: None,
                    accessibility: Accessibility::Default,
                    is_static: false,
                    is_readonly: false,
                    has_getter: false,
                    has_setter: false,
                    declaration: type_decl.syntax().clone(),
                })
            });
            model
                .parts
                .entry(type_id)
                .or_default()
                .push(type_decl.syntax().clone());
            model
                .declarations
                .insert(type_decl.syntax().clone(), type_id);
            model.bind_members(&type_decl, type_id, &mut type_ids);
        }
        model
    }

    fn bind_members(
        &mut self,
        type_decl: &TypeDecl,
        container: SymbolId,
        type_ids: &mut HashMap<String, TypeId>,
    ) {
        for field in type_decl.fields() {
            let ty = field
                .type_ref()
                .map(|t| Self::intern_type(type_ids, &t.text()));
            let accessibility = member_accessibility(field.syntax());
            let is_static = field.is_static();
            let is_readonly = field.is_readonly();
            for declarator in field.declarators() {
                let Some(name) = declarator.name() else {
                    continue;
                };
                let id = self.push_symbol(Symbol {
                    kind: SymbolKind::Field,
                    name: name.clone(),
                    container: Some(container),
                    ty,
                    accessibility,
                    is_static,
                    is_readonly,
                    has_getter: false,
                    has_setter: false,
                    declaration: declarator.syntax().clone(),
                });
                self.declarations.insert(declarator.syntax().clone(), id);
                self.members.insert((container, name), id);
            }
        }

        for property in type_decl.properties() {
            // Explicit interface implementations have no plain name and do
            // not become plain named property symbols.
            let Some(name) = property.name() else {
                continue;
            };
            let ty = property
                .type_ref()
                .map(|t| Self::intern_type(type_ids, &t.text()));
            let (has_getter, has_setter) = match property.accessor_list() {
                Some(list) => (
                    list.accessors().any(|a| a.is_get()),
                    list.accessors().any(|a| a.is_set()),
                ),
                None => (false, false),
            };
            let id = self.push_symbol(Symbol {
                kind: SymbolKind::Property,
                name: name.clone(),
                container: Some(container),
                ty,
                accessibility: member_accessibility(property.syntax()),
                is_static: property.is_static(),
                is_readonly: has_getter && !has_setter,
                has_getter,
                has_setter,
                declaration: property.syntax().clone(),
            });
            self.declarations.insert(property.syntax().clone(), id);
            self.members.insert((container, name), id);
        }
    }

    fn push_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    fn intern_type(type_ids: &mut HashMap<String, TypeId>, text: &str) -> TypeId {
        let next = TypeId(type_ids.len() as u32);
        *type_ids.entry(text.to_string()).or_insert(next)
    }

    fn enclosing_type(&self, node: &CsSyntaxNode) -> Option<SymbolId> {
        node.ancestors()
            .find(|a| a.kind() == CsSyntaxKind::TypeDecl)
            .and_then(|decl| self.declarations.get(&decl).copied())
    }

    fn member_lookup(&self, ty: SymbolId, name: &str) -> Option<SymbolId> {
        self.members.get(&(ty, name.to_string())).copied()
    }

    /// Parameters of the enclosing constructor or method shadow members
    fn shadowed_by_parameter(&self, node: &CsSyntaxNode, name: &str) -> bool {
        for ancestor in node.ancestors() {
            let params = match ancestor.kind() {
                CsSyntaxKind::CtorDecl => {
                    CtorDecl::cast(ancestor).and_then(|c| c.param_list())
                }
                CsSyntaxKind::MethodDecl => {
                    MethodDecl::cast(ancestor).and_then(|m| m.param_list())
                }
                _ => continue,
            };
            if let Some(params) = params {
                return params.params().filter_map(|p| p.name()).any(|n| n == name);
            }
            return false;
        }
        false
    }
}

impl SemanticModel for TestModel {
    fn root(&self) -> &CsSyntaxNode {
        &self.root
    }

    fn declared_symbol(&self, node: &CsSyntaxNode) -> Option<SymbolId> {
        self.declarations.get(node).copied()
    }

    fn resolve_reference(&self, node: &CsSyntaxNode) -> Option<SymbolId> {
        let name_node = IdentifierName::cast(node.clone())?;
        let name = name_node.text();

        if let Some(parent) = node.parent()
            && parent.kind() == CsSyntaxKind::MemberAccessExpr
        {
            let access = MemberAccessExpr::cast(parent)?;
            if access.name().map(|n| n.syntax().clone()) == Some(node.clone()) {
                // Qualified occurrence: only `this.<name>` resolves here.
                let receiver = access.receiver()?;
                if receiver.kind() != CsSyntaxKind::ThisExpr {
                    return None;
                }
                let ty = self.enclosing_type(node)?;
                return self.member_lookup(ty, &name);
            }
        }

        if self.shadowed_by_parameter(node, &name) {
            return None;
        }
        let ty = self.enclosing_type(node)?;
        self.member_lookup(ty, &name)
    }

    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    fn types_equal(&self, a: TypeId, b: TypeId) -> bool {
        a == b
    }

    fn declaring_nodes(&self, ty: SymbolId) -> Vec<CsSyntaxNode> {
        self.parts.get(&ty).cloned().unwrap_or_default()
    }
}

fn member_accessibility(node: &CsSyntaxNode) -> Accessibility {
    use autoprop_core::cst::CsSyntaxNodeExt;

    if node.has_token(CsSyntaxKind::PublicKw) {
        Accessibility::Public
    } else if node.has_token(CsSyntaxKind::ProtectedKw) {
        Accessibility::Protected
    } else if node.has_token(CsSyntaxKind::InternalKw) {
        Accessibility::Internal
    } else if node.has_token(CsSyntaxKind::PrivateKw) {
        Accessibility::Private
    } else {
        Accessibility::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use autoprop_core::cst::ast::{AstNode, IdentifierName, PropertyDecl, VariableDeclarator};

    fn model_for(source: &str) -> (CsSyntaxNode, Box<dyn SemanticModel>) {
        let tree = parse(source);
        let model = TestAnalyzer.analyze(&tree);
        (tree, model)
    }

    const SOURCE: &str = "\
class TypeName {
    readonly string value;

    TypeName(string value) {
        this.value = value;
    }

    public string Value { get { return this.value; } }
}
";

    #[test]
    fn declared_symbols_for_fields_and_properties() {
        let (tree, model) = model_for(SOURCE);
        let declarator = tree
            .descendants()
            .filter_map(VariableDeclarator::cast)
            .next()
            .unwrap();
        let field = model.declared_symbol(declarator.syntax()).unwrap();
        let field = model.symbol(field).unwrap();
        assert_eq!(field.kind, SymbolKind::Field);
        assert!(field.is_readonly);
        assert!(field.is_private_or_default());

        let property = tree
            .descendants()
            .filter_map(PropertyDecl::cast)
            .next()
            .unwrap();
        let property = model.declared_symbol(property.syntax()).unwrap();
        let property = model.symbol(property).unwrap();
        assert_eq!(property.kind, SymbolKind::Property);
        assert!(property.has_getter);
        assert!(!property.has_setter);
        assert_eq!(property.container, field.container);
        assert!(model.types_equal(property.ty.unwrap(), field.ty.unwrap()));
    }

    #[test]
    fn parameters_shadow_fields_but_this_qualification_does_not() {
        let (tree, model) = model_for(SOURCE);
        let idents: Vec<IdentifierName> = tree
            .descendants()
            .filter_map(IdentifierName::cast)
            .filter(|i| i.text() == "value")
            .collect();
        // `this.value` (target), bare `value` (rhs), `this.value` (getter)
        assert_eq!(idents.len(), 3);

        let qualified = model.resolve_reference(idents[0].syntax());
        assert!(qualified.is_some());
        assert_eq!(
            model.symbol(qualified.unwrap()).unwrap().kind,
            SymbolKind::Field
        );

        let bare_rhs = model.resolve_reference(idents[1].syntax());
        assert!(bare_rhs.is_none(), "constructor parameter must shadow");
    }

    #[test]
    fn partial_declarations_merge_into_one_type() {
        let source = "\
partial class Split {
    readonly int seed;
}

partial class Split {
    public int Seed { get { return seed; } }
}
";
        let (tree, model) = model_for(source);
        let declarator = tree
            .descendants()
            .filter_map(VariableDeclarator::cast)
            .next()
            .unwrap();
        let field_id = model.declared_symbol(declarator.syntax()).unwrap();
        let container = model.symbol(field_id).unwrap().container.unwrap();
        assert_eq!(model.declaring_nodes(container).len(), 2);

        // The getter in the second part resolves into the first part's field.
        let getter_ref = tree
            .descendants()
            .filter_map(IdentifierName::cast)
            .find(|i| i.text() == "seed")
            .unwrap();
        assert_eq!(model.resolve_reference(getter_ref.syntax()), Some(field_id));
    }

    #[test]
    fn exact_type_identity_distinguishes_names() {
        let source = "\
class Zoo {
    readonly Animal resident;
    public IAnimal Resident { get { return resident; } }
}
";
        let (tree, model) = model_for(source);
        let declarator = tree
            .descendants()
            .filter_map(VariableDeclarator::cast)
            .next()
            .unwrap();
        let field = model.declared_symbol(declarator.syntax()).unwrap();
        let field_ty = model.symbol(field).unwrap().ty.unwrap();
        let property = tree
            .descendants()
            .filter_map(PropertyDecl::cast)
            .next()
            .unwrap();
        let property = model.declared_symbol(property.syntax()).unwrap();
        let property_ty = model.symbol(property).unwrap().ty.unwrap();
        assert!(!model.types_equal(field_ty, property_ty));
    }
}
