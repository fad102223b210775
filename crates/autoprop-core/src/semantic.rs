//! Semantic facade
//!
//! The engine does not resolve symbols itself. A host supplies an
//! implementation of [`SemanticAnalyzer`] that binds a tree snapshot into a
//! [`SemanticModel`], and the detector and fix talk to that model through
//! this narrow contract: declared symbols, reference resolution, exact type
//! identity, and the declaring nodes of a type across its partial parts.
//!
//! Models are snapshots. Every edit produces a new tree, and the fix-all
//! loop asks the analyzer for a fresh model each iteration; nothing here is
//! ever cached across an edit.

use crate::cst::CsSyntaxNode;

/// Opaque handle to a symbol inside one [`SemanticModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

/// Opaque handle to a type identity inside one [`SemanticModel`]
///
/// Two handles compare equal only through [`SemanticModel::types_equal`];
/// the engine never assumes anything about the representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Type,
    Field,
    Property,
}

/// Declared accessibility of a member
///
/// `Default` is an unstated accessibility, which for C# class members means
/// private.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Default,
    Private,
    Protected,
    Internal,
    Public,
}

/// Symbol data the host binder fills in for each declaration
#[derive(Debug, Clone)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    /// Containing type, `None` for top-level types
    pub container: Option<SymbolId>,
    /// Declared type of a field or property
    pub ty: Option<TypeId>,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_readonly: bool,
    pub has_getter: bool,
    pub has_setter: bool,
    /// The declaration node: the variable declarator for fields, the
    /// declaration itself for types and properties
    pub declaration: CsSyntaxNode,
}

impl Symbol {
    /// Private or unstated accessibility; never visible outside the type
    pub fn is_private_or_default(&self) -> bool {
        matches!(
            self.accessibility,
            Accessibility::Private | Accessibility::Default
        )
    }
}

/// Read-only semantic view of one tree snapshot
pub trait SemanticModel {
    /// The root of the snapshot this model was bound against
    fn root(&self) -> &CsSyntaxNode;

    /// The symbol introduced by a declaration node, if any
    fn declared_symbol(&self, node: &CsSyntaxNode) -> Option<SymbolId>;

    /// The symbol an identifier occurrence refers to, if it resolves
    fn resolve_reference(&self, node: &CsSyntaxNode) -> Option<SymbolId>;

    /// Symbol data for a handle produced by this model
    fn symbol(&self, id: SymbolId) -> Option<&Symbol>;

    /// Exact type identity; assignability is not sufficient
    fn types_equal(&self, a: TypeId, b: TypeId) -> bool;

    /// All syntactic declarations of a type, covering partial declarations
    fn declaring_nodes(&self, ty: SymbolId) -> Vec<CsSyntaxNode>;
}

/// Host capability that binds tree snapshots into semantic models
pub trait SemanticAnalyzer: Send + Sync {
    fn analyze(&self, root: &CsSyntaxNode) -> Box<dyn SemanticModel>;
}
