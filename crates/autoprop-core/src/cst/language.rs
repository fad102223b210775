//! Rowan language implementation for the C# subset
//!
//! Connects `CsSyntaxKind` to Rowan's generic CST infrastructure.

use rowan::Language;

use super::CsSyntaxKind;

/// Zero-sized marker implementing `rowan::Language`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CsLanguage;

impl Language for CsLanguage {
    type Kind = CsSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        match raw.0 {
            // Trivia
            0 => CsSyntaxKind::Whitespace,
            1 => CsSyntaxKind::Newline,
            2 => CsSyntaxKind::CommentLine,
            3 => CsSyntaxKind::CommentBlock,

            // Keywords
            10 => CsSyntaxKind::ClassKw,
            11 => CsSyntaxKind::InterfaceKw,
            12 => CsSyntaxKind::StructKw,
            13 => CsSyntaxKind::NamespaceKw,
            14 => CsSyntaxKind::GetKw,
            15 => CsSyntaxKind::SetKw,
            16 => CsSyntaxKind::ReturnKw,
            17 => CsSyntaxKind::ThisKw,
            18 => CsSyntaxKind::PublicKw,
            19 => CsSyntaxKind::PrivateKw,
            20 => CsSyntaxKind::ProtectedKw,
            21 => CsSyntaxKind::InternalKw,
            22 => CsSyntaxKind::StaticKw,
            23 => CsSyntaxKind::ReadonlyKw,
            24 => CsSyntaxKind::PartialKw,

            // Punctuation
            100 => CsSyntaxKind::LBrace,
            101 => CsSyntaxKind::RBrace,
            102 => CsSyntaxKind::LParen,
            103 => CsSyntaxKind::RParen,
            104 => CsSyntaxKind::Semicolon,
            105 => CsSyntaxKind::Comma,
            106 => CsSyntaxKind::Dot,
            107 => CsSyntaxKind::Eq,
            108 => CsSyntaxKind::Colon,

            // Literals & identifiers
            150 => CsSyntaxKind::Ident,
            151 => CsSyntaxKind::StringLit,
            152 => CsSyntaxKind::NumberLit,

            // Composite nodes
            200 => CsSyntaxKind::SourceFile,
            201 => CsSyntaxKind::NamespaceDecl,
            202 => CsSyntaxKind::TypeDecl,
            203 => CsSyntaxKind::BaseList,
            204 => CsSyntaxKind::FieldDecl,
            205 => CsSyntaxKind::VariableDeclarator,
            206 => CsSyntaxKind::EqualsValueClause,
            207 => CsSyntaxKind::PropertyDecl,
            208 => CsSyntaxKind::QualifiedName,
            209 => CsSyntaxKind::AccessorList,
            210 => CsSyntaxKind::Accessor,
            211 => CsSyntaxKind::CtorDecl,
            212 => CsSyntaxKind::MethodDecl,
            213 => CsSyntaxKind::ParamList,
            214 => CsSyntaxKind::Param,
            215 => CsSyntaxKind::Block,
            216 => CsSyntaxKind::ReturnStmt,
            217 => CsSyntaxKind::ExprStmt,
            218 => CsSyntaxKind::AssignmentExpr,
            219 => CsSyntaxKind::MemberAccessExpr,
            220 => CsSyntaxKind::InvocationExpr,
            221 => CsSyntaxKind::ArgList,
            222 => CsSyntaxKind::IdentifierName,
            223 => CsSyntaxKind::ThisExpr,
            224 => CsSyntaxKind::LiteralExpr,
            225 => CsSyntaxKind::TypeRef,
            226 => CsSyntaxKind::ParenExpr,

            _ => CsSyntaxKind::Error,
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrip() {
        let kinds = [
            CsSyntaxKind::Whitespace,
            CsSyntaxKind::ClassKw,
            CsSyntaxKind::Ident,
            CsSyntaxKind::Semicolon,
            CsSyntaxKind::PropertyDecl,
            CsSyntaxKind::VariableDeclarator,
            CsSyntaxKind::ParenExpr,
        ];

        for &kind in &kinds {
            let raw = CsLanguage::kind_to_raw(kind);
            let back = CsLanguage::kind_from_raw(raw);
            assert_eq!(kind, back, "roundtrip failed for {kind:?}");
        }
    }

    #[test]
    fn unknown_raw_kind_maps_to_error() {
        assert_eq!(
            CsLanguage::kind_from_raw(rowan::SyntaxKind(9999)),
            CsSyntaxKind::Error
        );
    }
}
