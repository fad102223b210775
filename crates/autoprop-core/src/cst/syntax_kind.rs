//! Syntax kinds for the C# concrete syntax tree
//!
//! Kinds are split into trivia, keywords, punctuation, literals, and
//! composite nodes. The numeric values are stable because they are the
//! raw representation stored in the Rowan green tree.

/// All token and node kinds that can occur in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum CsSyntaxKind {
    // Trivia
    Whitespace = 0,
    Newline = 1,
    CommentLine = 2,
    CommentBlock = 3,

    // Keywords (10-49)
    ClassKw = 10,
    InterfaceKw = 11,
    StructKw = 12,
    NamespaceKw = 13,
    GetKw = 14,
    SetKw = 15,
    ReturnKw = 16,
    ThisKw = 17,
    PublicKw = 18,
    PrivateKw = 19,
    ProtectedKw = 20,
    InternalKw = 21,
    StaticKw = 22,
    ReadonlyKw = 23,
    PartialKw = 24,

    // Punctuation (100-149)
    LBrace = 100,
    RBrace = 101,
    LParen = 102,
    RParen = 103,
    Semicolon = 104,
    Comma = 105,
    Dot = 106,
    Eq = 107,
    Colon = 108,

    // Literals & identifiers (150-199)
    Ident = 150,
    StringLit = 151,
    NumberLit = 152,

    // Composite nodes (200-299)
    SourceFile = 200,
    NamespaceDecl = 201,
    TypeDecl = 202,
    BaseList = 203,
    FieldDecl = 204,
    VariableDeclarator = 205,
    EqualsValueClause = 206,
    PropertyDecl = 207,
    QualifiedName = 208,
    AccessorList = 209,
    Accessor = 210,
    CtorDecl = 211,
    MethodDecl = 212,
    ParamList = 213,
    Param = 214,
    Block = 215,
    ReturnStmt = 216,
    ExprStmt = 217,
    AssignmentExpr = 218,
    MemberAccessExpr = 219,
    InvocationExpr = 220,
    ArgList = 221,
    IdentifierName = 222,
    ThisExpr = 223,
    LiteralExpr = 224,
    TypeRef = 225,
    ParenExpr = 226,

    // Special
    Error = 400,
}

impl CsSyntaxKind {
    /// Whitespace, newlines and comments carry no syntactic meaning
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            CsSyntaxKind::Whitespace
                | CsSyntaxKind::Newline
                | CsSyntaxKind::CommentLine
                | CsSyntaxKind::CommentBlock
        )
    }

    /// Member and type modifier keywords
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            CsSyntaxKind::PublicKw
                | CsSyntaxKind::PrivateKw
                | CsSyntaxKind::ProtectedKw
                | CsSyntaxKind::InternalKw
                | CsSyntaxKind::StaticKw
                | CsSyntaxKind::ReadonlyKw
                | CsSyntaxKind::PartialKw
        )
    }
}

impl From<CsSyntaxKind> for rowan::SyntaxKind {
    fn from(kind: CsSyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}
