#![allow(dead_code)]

use autoprop_core::cancel::CancelToken;
use autoprop_core::config::LintConfig;
use autoprop_core::diagnostics::Diagnostic;
use autoprop_core::semantic::SemanticAnalyzer;
use autoprop_rules::{Document, FixAllScope, check_use_auto_property, fix_all};
use autoprop_test::{TestAnalyzer, parse};

pub fn document(path: &str, source: &str) -> Document {
    Document::from_root(path, &parse(source))
}

/// Run fix-all over one document and return the resulting source text;
/// unchanged input comes back verbatim
pub fn fix_source(source: &str) -> String {
    let doc = document("test.cs", source);
    let result = fix_all(
        &TestAnalyzer,
        FixAllScope::Document(&doc),
        &LintConfig::default(),
        &CancelToken::new(),
    )
    .expect("fix-all should not fail");
    result
        .changed
        .into_iter()
        .next()
        .map(|changed| changed.text())
        .unwrap_or_else(|| source.to_string())
}

pub fn diagnostics_for(source: &str) -> Vec<Diagnostic> {
    diagnostics_with(source, &LintConfig::default())
}

pub fn diagnostics_with(source: &str, config: &LintConfig) -> Vec<Diagnostic> {
    let tree = parse(source);
    let model = TestAnalyzer.analyze(&tree);
    check_use_auto_property(model.as_ref(), config)
}
