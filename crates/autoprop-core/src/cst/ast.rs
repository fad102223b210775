//! Typed AST layer over the CST
//!
//! Ergonomic, type-safe wrappers over raw CST nodes. Each wrapper
//! implements `cast()` to safely convert from an untyped node.

use super::{CsSyntaxKind, CsSyntaxNode, CsSyntaxNodeExt, CsSyntaxToken};

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: CsSyntaxKind) -> bool;
    fn cast(node: CsSyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &CsSyntaxNode;
}

macro_rules! ast_node {
    ($(#[$attr:meta])* $name:ident, $kind:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            syntax: CsSyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: CsSyntaxKind) -> bool {
                kind == CsSyntaxKind::$kind
            }

            fn cast(node: CsSyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self { syntax: node })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &CsSyntaxNode {
                &self.syntax
            }
        }
    };
}

ast_node!(
    /// Root node holding namespaces and type declarations
    SourceFile,
    SourceFile
);

ast_node!(
    /// `class`, `struct` or `interface` declaration
    TypeDecl,
    TypeDecl
);

ast_node!(
    /// One field statement declaring one or more variables
    FieldDecl,
    FieldDecl
);

ast_node!(
    /// A single declared variable inside a field statement
    VariableDeclarator,
    VariableDeclarator
);

ast_node!(
    /// `= <expression>` initializer clause
    EqualsValueClause,
    EqualsValueClause
);

ast_node!(
    /// Property declaration with an accessor list
    PropertyDecl,
    PropertyDecl
);

ast_node!(AccessorList, AccessorList);
ast_node!(Accessor, Accessor);
ast_node!(Block, Block);
ast_node!(ReturnStmt, ReturnStmt);
ast_node!(ExprStmt, ExprStmt);
ast_node!(AssignmentExpr, AssignmentExpr);
ast_node!(MemberAccessExpr, MemberAccessExpr);
ast_node!(IdentifierName, IdentifierName);
ast_node!(ThisExpr, ThisExpr);
ast_node!(TypeRef, TypeRef);
ast_node!(CtorDecl, CtorDecl);
ast_node!(MethodDecl, MethodDecl);
ast_node!(ParamList, ParamList);
ast_node!(Param, Param);

impl SourceFile {
    /// All type declarations, including those nested in namespaces
    pub fn types(&self) -> impl Iterator<Item = TypeDecl> + '_ {
        self.syntax.descendants().filter_map(TypeDecl::cast)
    }
}

impl TypeDecl {
    pub fn name_token(&self) -> Option<CsSyntaxToken> {
        self.syntax.token_of_kind(CsSyntaxKind::Ident)
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|t| t.text().to_string())
    }

    pub fn is_interface(&self) -> bool {
        self.syntax.has_token(CsSyntaxKind::InterfaceKw)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldDecl> + '_ {
        self.syntax.children().filter_map(FieldDecl::cast)
    }

    pub fn properties(&self) -> impl Iterator<Item = PropertyDecl> + '_ {
        self.syntax.children().filter_map(PropertyDecl::cast)
    }
}

impl FieldDecl {
    pub fn type_ref(&self) -> Option<TypeRef> {
        self.syntax
            .child_of_kind(CsSyntaxKind::TypeRef)
            .and_then(TypeRef::cast)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> + '_ {
        self.syntax.children().filter_map(VariableDeclarator::cast)
    }

    pub fn has_modifier(&self, kind: CsSyntaxKind) -> bool {
        self.syntax.has_token(kind)
    }

    pub fn is_readonly(&self) -> bool {
        self.has_modifier(CsSyntaxKind::ReadonlyKw)
    }

    pub fn is_static(&self) -> bool {
        self.has_modifier(CsSyntaxKind::StaticKw)
    }
}

impl VariableDeclarator {
    pub fn name_token(&self) -> Option<CsSyntaxToken> {
        self.syntax.token_of_kind(CsSyntaxKind::Ident)
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|t| t.text().to_string())
    }

    pub fn initializer(&self) -> Option<EqualsValueClause> {
        self.syntax
            .child_of_kind(CsSyntaxKind::EqualsValueClause)
            .and_then(EqualsValueClause::cast)
    }

    /// The field statement this declarator belongs to
    pub fn field_decl(&self) -> Option<FieldDecl> {
        self.syntax.parent().and_then(FieldDecl::cast)
    }
}

impl EqualsValueClause {
    /// The initializer expression
    pub fn value(&self) -> Option<CsSyntaxNode> {
        self.syntax.children().next()
    }
}

impl PropertyDecl {
    /// The simple name token. Explicit interface implementations carry a
    /// qualified name instead and return `None` here.
    pub fn name_token(&self) -> Option<CsSyntaxToken> {
        self.syntax.token_of_kind(CsSyntaxKind::Ident)
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|t| t.text().to_string())
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        self.syntax
            .child_of_kind(CsSyntaxKind::TypeRef)
            .and_then(TypeRef::cast)
    }

    pub fn accessor_list(&self) -> Option<AccessorList> {
        self.syntax
            .child_of_kind(CsSyntaxKind::AccessorList)
            .and_then(AccessorList::cast)
    }

    pub fn has_modifier(&self, kind: CsSyntaxKind) -> bool {
        self.syntax.has_token(kind)
    }

    pub fn is_static(&self) -> bool {
        self.has_modifier(CsSyntaxKind::StaticKw)
    }
}

impl AccessorList {
    pub fn accessors(&self) -> impl Iterator<Item = Accessor> + '_ {
        self.syntax.children().filter_map(Accessor::cast)
    }

    pub fn getter(&self) -> Option<Accessor> {
        self.accessors().find(Accessor::is_get)
    }
}

impl Accessor {
    pub fn is_get(&self) -> bool {
        self.syntax.has_token(CsSyntaxKind::GetKw)
    }

    pub fn is_set(&self) -> bool {
        self.syntax.has_token(CsSyntaxKind::SetKw)
    }

    /// The explicit body, absent for auto-property accessors like `get;`
    pub fn body(&self) -> Option<Block> {
        self.syntax
            .child_of_kind(CsSyntaxKind::Block)
            .and_then(Block::cast)
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = CsSyntaxNode> + '_ {
        self.syntax.children()
    }
}

impl ReturnStmt {
    pub fn expression(&self) -> Option<CsSyntaxNode> {
        self.syntax.children().next()
    }
}

impl ExprStmt {
    pub fn expression(&self) -> Option<CsSyntaxNode> {
        self.syntax.children().next()
    }
}

impl AssignmentExpr {
    /// The assignment target
    pub fn left(&self) -> Option<CsSyntaxNode> {
        self.syntax.children().next()
    }

    pub fn right(&self) -> Option<CsSyntaxNode> {
        self.syntax.children().nth(1)
    }
}

impl MemberAccessExpr {
    /// The receiver expression, e.g. `this` in `this.value`
    pub fn receiver(&self) -> Option<CsSyntaxNode> {
        self.syntax.children().next()
    }

    /// The accessed member name, the last direct `IdentifierName` child
    pub fn name(&self) -> Option<IdentifierName> {
        self.syntax
            .children()
            .filter_map(IdentifierName::cast)
            .last()
    }
}

impl IdentifierName {
    pub fn ident_token(&self) -> Option<CsSyntaxToken> {
        self.syntax.token_of_kind(CsSyntaxKind::Ident)
    }

    pub fn text(&self) -> String {
        self.ident_token()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

impl TypeRef {
    /// The type text with trivia stripped; exact equality of this text is
    /// what the test binder interns type identities from
    pub fn text(&self) -> String {
        self.syntax.trimmed_text()
    }
}

impl CtorDecl {
    pub fn name_token(&self) -> Option<CsSyntaxToken> {
        self.syntax.token_of_kind(CsSyntaxKind::Ident)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        self.syntax
            .child_of_kind(CsSyntaxKind::ParamList)
            .and_then(ParamList::cast)
    }
}

impl MethodDecl {
    pub fn name_token(&self) -> Option<CsSyntaxToken> {
        self.syntax.token_of_kind(CsSyntaxKind::Ident)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        self.syntax
            .child_of_kind(CsSyntaxKind::ParamList)
            .and_then(ParamList::cast)
    }
}

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        self.syntax.children().filter_map(Param::cast)
    }
}

impl Param {
    pub fn name_token(&self) -> Option<CsSyntaxToken> {
        self.syntax.token_of_kind(CsSyntaxKind::Ident)
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|t| t.text().to_string())
    }
}
