//! Recursive-descent parser for the C# subset used in tests
//!
//! Builds a lossless Rowan green tree: trivia tokens are attached ahead of
//! the token they precede, inside the node that starts at that token. The
//! parser panics on input outside the subset; it only ever sees fixture
//! source written for the test suites.

use autoprop_core::cst::{CsSyntaxKind, CsSyntaxNode, GreenNodeBuilder};

use crate::lexer::{Token, lex};

/// Parse fixture source into a syntax tree rooted at a `SourceFile` node
pub fn parse(source: &str) -> CsSyntaxNode {
    let mut parser = Parser {
        tokens: lex(source),
        pos: 0,
        builder: GreenNodeBuilder::new(),
    };
    parser.parse_source_file();
    CsSyntaxNode::new_root(parser.builder.finish())
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
}

impl Parser {
    // ------------------------------------------------------------------
    // Token plumbing
    // ------------------------------------------------------------------

    fn peek(&self, n: usize) -> Option<CsSyntaxKind> {
        self.tokens[self.pos..]
            .iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .nth(n)
    }

    fn at(&self, kind: CsSyntaxKind) -> bool {
        self.peek(0) == Some(kind)
    }

    fn eat_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), &token.text);
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        self.eat_trivia();
        let token = self
            .tokens
            .get(self.pos)
            .unwrap_or_else(|| panic!("unexpected end of input"));
        self.builder.token(token.kind.into(), &token.text);
        self.pos += 1;
    }

    fn expect(&mut self, kind: CsSyntaxKind) {
        if !self.at(kind) {
            panic!("expected {:?}, found {:?}", kind, self.peek(0));
        }
        self.bump();
    }

    fn start(&mut self, kind: CsSyntaxKind) {
        self.builder.start_node(kind.into());
        self.eat_trivia();
    }

    fn finish(&mut self) {
        self.builder.finish_node();
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn parse_source_file(&mut self) {
        self.builder.start_node(CsSyntaxKind::SourceFile.into());
        while self.peek(0).is_some() {
            self.parse_top_level();
        }
        self.eat_trivia();
        self.builder.finish_node();
    }

    fn parse_top_level(&mut self) {
        if self.at(CsSyntaxKind::NamespaceKw) {
            self.parse_namespace();
        } else {
            self.parse_type_decl();
        }
    }

    fn parse_namespace(&mut self) {
        self.start(CsSyntaxKind::NamespaceDecl);
        self.expect(CsSyntaxKind::NamespaceKw);
        self.expect(CsSyntaxKind::Ident);
        while self.at(CsSyntaxKind::Dot) {
            self.bump();
            self.expect(CsSyntaxKind::Ident);
        }
        self.expect(CsSyntaxKind::LBrace);
        while !self.at(CsSyntaxKind::RBrace) && self.peek(0).is_some() {
            self.parse_top_level();
        }
        self.expect(CsSyntaxKind::RBrace);
        self.finish();
    }

    fn parse_type_decl(&mut self) {
        self.start(CsSyntaxKind::TypeDecl);
        self.parse_modifiers();
        match self.peek(0) {
            Some(
                CsSyntaxKind::ClassKw | CsSyntaxKind::InterfaceKw | CsSyntaxKind::StructKw,
            ) => self.bump(),
            other => panic!("expected type declaration, found {other:?}"),
        }
        self.expect(CsSyntaxKind::Ident);
        if self.at(CsSyntaxKind::Colon) {
            self.start(CsSyntaxKind::BaseList);
            self.expect(CsSyntaxKind::Colon);
            self.expect(CsSyntaxKind::Ident);
            while self.at(CsSyntaxKind::Comma) {
                self.bump();
                self.expect(CsSyntaxKind::Ident);
            }
            self.finish();
        }
        self.expect(CsSyntaxKind::LBrace);
        while !self.at(CsSyntaxKind::RBrace) && self.peek(0).is_some() {
            self.parse_member();
        }
        self.expect(CsSyntaxKind::RBrace);
        self.finish();
    }

    fn parse_modifiers(&mut self) {
        while self.peek(0).is_some_and(CsSyntaxKind::is_modifier) {
            self.bump();
        }
    }

    fn parse_member(&mut self) {
        let mut i = 0;
        while self.peek(i).is_some_and(CsSyntaxKind::is_modifier) {
            i += 1;
        }
        match self.peek(i) {
            Some(
                CsSyntaxKind::ClassKw | CsSyntaxKind::InterfaceKw | CsSyntaxKind::StructKw,
            ) => {
                self.parse_type_decl();
                return;
            }
            Some(CsSyntaxKind::Ident) => {}
            other => panic!("expected member declaration, found {other:?}"),
        }
        // Constructor: the identifier is immediately followed by `(`.
        if self.peek(i + 1) == Some(CsSyntaxKind::LParen) {
            self.parse_ctor();
            return;
        }
        // Otherwise the identifier is a type, followed by a (possibly
        // qualified) member name.
        let mut j = i + 1;
        while self.peek(j) == Some(CsSyntaxKind::Ident) && self.peek(j + 1) == Some(CsSyntaxKind::Dot)
        {
            j += 2;
        }
        let qualified = j > i + 1;
        match (self.peek(j), self.peek(j + 1)) {
            (Some(CsSyntaxKind::Ident), Some(CsSyntaxKind::LParen)) => self.parse_method(qualified),
            (Some(CsSyntaxKind::Ident), Some(CsSyntaxKind::LBrace)) => {
                self.parse_property(qualified)
            }
            (
                Some(CsSyntaxKind::Ident),
                Some(CsSyntaxKind::Eq | CsSyntaxKind::Comma | CsSyntaxKind::Semicolon),
            ) => self.parse_field(),
            other => panic!("unsupported member shape at {other:?}"),
        }
    }

    fn parse_field(&mut self) {
        self.start(CsSyntaxKind::FieldDecl);
        self.parse_modifiers();
        self.parse_type_ref();
        self.parse_declarator();
        while self.at(CsSyntaxKind::Comma) {
            self.bump();
            self.parse_declarator();
        }
        self.expect(CsSyntaxKind::Semicolon);
        self.finish();
    }

    fn parse_declarator(&mut self) {
        self.start(CsSyntaxKind::VariableDeclarator);
        self.expect(CsSyntaxKind::Ident);
        if self.at(CsSyntaxKind::Eq) {
            self.parse_equals_value();
        }
        self.finish();
    }

    fn parse_equals_value(&mut self) {
        self.start(CsSyntaxKind::EqualsValueClause);
        self.expect(CsSyntaxKind::Eq);
        self.parse_expr();
        self.finish();
    }

    fn parse_property(&mut self, qualified: bool) {
        self.start(CsSyntaxKind::PropertyDecl);
        self.parse_modifiers();
        self.parse_type_ref();
        self.parse_member_name(qualified);
        self.parse_accessor_list();
        if self.at(CsSyntaxKind::Eq) {
            self.parse_equals_value();
            self.expect(CsSyntaxKind::Semicolon);
        }
        self.finish();
    }

    fn parse_member_name(&mut self, qualified: bool) {
        if qualified {
            self.start(CsSyntaxKind::QualifiedName);
            self.expect(CsSyntaxKind::Ident);
            while self.at(CsSyntaxKind::Dot) {
                self.bump();
                self.expect(CsSyntaxKind::Ident);
            }
            self.finish();
        } else {
            self.expect(CsSyntaxKind::Ident);
        }
    }

    fn parse_accessor_list(&mut self) {
        self.start(CsSyntaxKind::AccessorList);
        self.expect(CsSyntaxKind::LBrace);
        while self.at(CsSyntaxKind::GetKw) || self.at(CsSyntaxKind::SetKw) {
            self.start(CsSyntaxKind::Accessor);
            self.bump();
            if self.at(CsSyntaxKind::Semicolon) {
                self.bump();
            } else {
                self.parse_block();
            }
            self.finish();
        }
        self.expect(CsSyntaxKind::RBrace);
        self.finish();
    }

    fn parse_ctor(&mut self) {
        self.start(CsSyntaxKind::CtorDecl);
        self.parse_modifiers();
        self.expect(CsSyntaxKind::Ident);
        self.parse_param_list();
        self.parse_block();
        self.finish();
    }

    fn parse_method(&mut self, qualified: bool) {
        self.start(CsSyntaxKind::MethodDecl);
        self.parse_modifiers();
        self.parse_type_ref();
        self.parse_member_name(qualified);
        self.parse_param_list();
        if self.at(CsSyntaxKind::Semicolon) {
            self.bump();
        } else {
            self.parse_block();
        }
        self.finish();
    }

    fn parse_param_list(&mut self) {
        self.start(CsSyntaxKind::ParamList);
        self.expect(CsSyntaxKind::LParen);
        if !self.at(CsSyntaxKind::RParen) {
            self.parse_param();
            while self.at(CsSyntaxKind::Comma) {
                self.bump();
                self.parse_param();
            }
        }
        self.expect(CsSyntaxKind::RParen);
        self.finish();
    }

    fn parse_param(&mut self) {
        self.start(CsSyntaxKind::Param);
        self.parse_type_ref();
        self.expect(CsSyntaxKind::Ident);
        self.finish();
    }

    fn parse_type_ref(&mut self) {
        self.start(CsSyntaxKind::TypeRef);
        self.expect(CsSyntaxKind::Ident);
        self.finish();
    }

    // ------------------------------------------------------------------
    // Statements & expressions
    // ------------------------------------------------------------------

    fn parse_block(&mut self) {
        self.start(CsSyntaxKind::Block);
        self.expect(CsSyntaxKind::LBrace);
        while !self.at(CsSyntaxKind::RBrace) && self.peek(0).is_some() {
            self.parse_stmt();
        }
        self.expect(CsSyntaxKind::RBrace);
        self.finish();
    }

    fn parse_stmt(&mut self) {
        match self.peek(0) {
            Some(CsSyntaxKind::ReturnKw) => {
                self.start(CsSyntaxKind::ReturnStmt);
                self.bump();
                if !self.at(CsSyntaxKind::Semicolon) {
                    self.parse_expr();
                }
                self.expect(CsSyntaxKind::Semicolon);
                self.finish();
            }
            Some(CsSyntaxKind::LBrace) => self.parse_block(),
            _ => {
                self.start(CsSyntaxKind::ExprStmt);
                self.parse_expr();
                self.expect(CsSyntaxKind::Semicolon);
                self.finish();
            }
        }
    }

    fn parse_expr(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_postfix();
        if self.at(CsSyntaxKind::Eq) {
            self.builder
                .start_node_at(checkpoint, CsSyntaxKind::AssignmentExpr.into());
            self.bump();
            // Right-associative, like the language it models.
            self.parse_expr();
            self.finish();
        }
    }

    fn parse_postfix(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_primary();
        loop {
            if self.at(CsSyntaxKind::Dot) {
                self.builder
                    .start_node_at(checkpoint, CsSyntaxKind::MemberAccessExpr.into());
                self.bump();
                self.start(CsSyntaxKind::IdentifierName);
                self.expect(CsSyntaxKind::Ident);
                self.finish();
                self.finish();
            } else if self.at(CsSyntaxKind::LParen) {
                self.builder
                    .start_node_at(checkpoint, CsSyntaxKind::InvocationExpr.into());
                self.parse_arg_list();
                self.finish();
            } else {
                break;
            }
        }
    }

    fn parse_arg_list(&mut self) {
        self.start(CsSyntaxKind::ArgList);
        self.expect(CsSyntaxKind::LParen);
        if !self.at(CsSyntaxKind::RParen) {
            self.parse_expr();
            while self.at(CsSyntaxKind::Comma) {
                self.bump();
                self.parse_expr();
            }
        }
        self.expect(CsSyntaxKind::RParen);
        self.finish();
    }

    fn parse_primary(&mut self) {
        match self.peek(0) {
            Some(CsSyntaxKind::ThisKw) => {
                self.start(CsSyntaxKind::ThisExpr);
                self.bump();
                self.finish();
            }
            Some(CsSyntaxKind::Ident) => {
                self.start(CsSyntaxKind::IdentifierName);
                self.bump();
                self.finish();
            }
            Some(CsSyntaxKind::StringLit | CsSyntaxKind::NumberLit) => {
                self.start(CsSyntaxKind::LiteralExpr);
                self.bump();
                self.finish();
            }
            Some(CsSyntaxKind::LParen) => {
                self.start(CsSyntaxKind::ParenExpr);
                self.bump();
                self.parse_expr();
                self.expect(CsSyntaxKind::RParen);
                self.finish();
            }
            other => panic!("unsupported expression at {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoprop_core::cst::ast::{AstNode, SourceFile};

    #[test]
    fn parsing_is_lossless() {
        let source = "\
class TypeName {
    readonly string _value; // backing storage

    TypeName(string value) {
        _value = value;
    }

    public string Value { get { return _value; } }
}
";
        let tree = parse(source);
        assert_eq!(tree.text().to_string(), source);
    }

    #[test]
    fn namespaces_and_interfaces_are_lossless() {
        let source = "\
namespace App.Models {
    interface IHasName {
        string Name { get; }
    }

    class Person : IHasName {
        string IHasName.Name { get { return \"anonymous\"; } }
    }
}
";
        let tree = parse(source);
        assert_eq!(tree.text().to_string(), source);
    }

    #[test]
    fn typed_layer_sees_the_declarations() {
        let source = "\
class Holder {
    readonly int count, total = 0;

    public int Count { get { return count; } }
}
";
        let tree = parse(source);
        let file = SourceFile::cast(tree).unwrap();
        let class = file.types().next().unwrap();
        assert_eq!(class.name().as_deref(), Some("Holder"));

        let field = class.fields().next().unwrap();
        let declarators: Vec<String> =
            field.declarators().filter_map(|d| d.name()).collect();
        assert_eq!(declarators, vec!["count", "total"]);
        assert!(field.is_readonly());
        assert!(field.declarators().nth(1).unwrap().initializer().is_some());

        let property = class.properties().next().unwrap();
        assert_eq!(property.name().as_deref(), Some("Count"));
        let getter = property.accessor_list().unwrap().getter().unwrap();
        assert!(getter.body().is_some());
    }

    #[test]
    fn explicit_interface_property_has_no_plain_name() {
        let source = "\
class Person : IHasName {
    readonly string name;
    string IHasName.Name { get { return name; } }
}
";
        let tree = parse(source);
        let file = SourceFile::cast(tree).unwrap();
        let class = file.types().next().unwrap();
        let property = class.properties().next().unwrap();
        assert!(property.name_token().is_none());
    }
}
