//! Lexer for the C# subset used in tests
//!
//! Produces a flat token stream including trivia tokens, so the parser can
//! build a lossless tree: the concatenation of all token texts is exactly
//! the input.

use autoprop_core::cst::CsSyntaxKind;

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: CsSyntaxKind,
    pub text: String,
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = source;
    while !rest.is_empty() {
        let (kind, len) = next_token(rest);
        tokens.push(Token {
            kind,
            text: rest[..len].to_string(),
        });
        rest = &rest[len..];
    }
    tokens
}

fn next_token(s: &str) -> (CsSyntaxKind, usize) {
    let first = match s.chars().next() {
        Some(c) => c,
        None => return (CsSyntaxKind::Error, 0),
    };

    match first {
        '\r' if s.starts_with("\r\n") => (CsSyntaxKind::Newline, 2),
        '\r' | '\n' => (CsSyntaxKind::Newline, 1),
        ' ' | '\t' => {
            let len = s
                .find(|c: char| c != ' ' && c != '\t')
                .unwrap_or(s.len());
            (CsSyntaxKind::Whitespace, len)
        }
        '/' if s.starts_with("//") => {
            let len = s.find('\n').unwrap_or(s.len());
            (CsSyntaxKind::CommentLine, len)
        }
        '/' if s.starts_with("/*") => {
            let len = s.find("*/").map(|i| i + 2).unwrap_or(s.len());
            (CsSyntaxKind::CommentBlock, len)
        }
        '"' => (CsSyntaxKind::StringLit, string_len(s)),
        c if c.is_ascii_digit() => {
            let len = s
                .find(|c: char| !c.is_ascii_digit() && c != '.')
                .unwrap_or(s.len());
            (CsSyntaxKind::NumberLit, len)
        }
        c if c.is_alphabetic() || c == '_' => {
            let len = s
                .find(|c: char| !c.is_alphanumeric() && c != '_')
                .unwrap_or(s.len());
            (keyword_or_ident(&s[..len]), len)
        }
        '{' => (CsSyntaxKind::LBrace, 1),
        '}' => (CsSyntaxKind::RBrace, 1),
        '(' => (CsSyntaxKind::LParen, 1),
        ')' => (CsSyntaxKind::RParen, 1),
        ';' => (CsSyntaxKind::Semicolon, 1),
        ',' => (CsSyntaxKind::Comma, 1),
        '.' => (CsSyntaxKind::Dot, 1),
        '=' => (CsSyntaxKind::Eq, 1),
        ':' => (CsSyntaxKind::Colon, 1),
        c => (CsSyntaxKind::Error, c.len_utf8()),
    }
}

fn string_len(s: &str) -> usize {
    let mut escaped = false;
    for (offset, c) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => return offset + 1,
            _ => {}
        }
    }
    s.len()
}

fn keyword_or_ident(text: &str) -> CsSyntaxKind {
    match text {
        "class" => CsSyntaxKind::ClassKw,
        "interface" => CsSyntaxKind::InterfaceKw,
        "struct" => CsSyntaxKind::StructKw,
        "namespace" => CsSyntaxKind::NamespaceKw,
        "get" => CsSyntaxKind::GetKw,
        "set" => CsSyntaxKind::SetKw,
        "return" => CsSyntaxKind::ReturnKw,
        "this" => CsSyntaxKind::ThisKw,
        "public" => CsSyntaxKind::PublicKw,
        "private" => CsSyntaxKind::PrivateKw,
        "protected" => CsSyntaxKind::ProtectedKw,
        "internal" => CsSyntaxKind::InternalKw,
        "static" => CsSyntaxKind::StaticKw,
        "readonly" => CsSyntaxKind::ReadonlyKw,
        "partial" => CsSyntaxKind::PartialKw,
        _ => CsSyntaxKind::Ident,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexing_is_lossless() {
        let source = "class C {\n    readonly string _value; // note\n}\n";
        let tokens = lex(source);
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn keywords_and_identifiers() {
        let tokens = lex("readonly value");
        let kinds: Vec<CsSyntaxKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CsSyntaxKind::ReadonlyKw,
                CsSyntaxKind::Whitespace,
                CsSyntaxKind::Ident
            ]
        );
    }

    #[test]
    fn string_literal_with_escape() {
        let tokens = lex(r#""a \" b" x"#);
        assert_eq!(tokens[0].kind, CsSyntaxKind::StringLit);
        assert_eq!(tokens[0].text, r#""a \" b""#);
    }
}
