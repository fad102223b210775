//! Fix-all coordinator tests: scopes, merge behavior, cancellation, and
//! stale-candidate handling

mod common;

use std::path::PathBuf;

use autoprop_core::cancel::CancelToken;
use autoprop_core::config::LintConfig;
use autoprop_core::cst::ast::{AstNode, PropertyDecl};
use autoprop_core::error::AutopropError;
use autoprop_core::semantic::SemanticAnalyzer;
use autoprop_rules::{
    FixAllScope, Project, convert_to_auto_property, converge_document, detect, fix_all,
};
use autoprop_test::{TestAnalyzer, parse};
use common::document;

const WITH_CANDIDATE: &str = "\
class TypeName {
    readonly string _value;

    TypeName(string value) {
        _value = value;
    }

    public string Value { get { return _value; } }
}
";

const FIXED: &str = "\
class TypeName {

    TypeName(string value) {
        Value = value;
    }

    public string Value { get; }
}
";

const WITHOUT_CANDIDATE: &str = "\
class Plain {
    public int Answer { get { return 42; } }
}
";

#[test]
fn unchanged_documents_are_skipped() {
    let documents = vec![
        document("a.cs", WITH_CANDIDATE),
        document("b.cs", WITHOUT_CANDIDATE),
    ];
    let result = fix_all(
        &TestAnalyzer,
        FixAllScope::Project(&documents),
        &LintConfig::default(),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(result.changed.len(), 1);
    assert_eq!(result.changed[0].path, PathBuf::from("a.cs"));
    assert_eq!(result.changed[0].text(), FIXED);
}

#[test]
fn workspace_scope_preserves_input_order() {
    let projects = vec![
        Project {
            name: "first".to_string(),
            documents: vec![document("first/a.cs", WITH_CANDIDATE)],
        },
        Project {
            name: "second".to_string(),
            documents: vec![
                document("second/b.cs", WITHOUT_CANDIDATE),
                document("second/c.cs", WITH_CANDIDATE),
            ],
        },
    ];
    let result = fix_all(
        &TestAnalyzer,
        FixAllScope::Workspace(&projects),
        &LintConfig::default(),
        &CancelToken::new(),
    )
    .unwrap();

    let paths: Vec<PathBuf> = result.changed.iter().map(|c| c.path.clone()).collect();
    assert_eq!(
        paths,
        vec![PathBuf::from("first/a.cs"), PathBuf::from("second/c.cs")]
    );
    assert!(result.changed.iter().all(|c| c.text() == FIXED));
}

#[test]
fn canceled_batch_is_discarded() {
    let documents = vec![document("a.cs", WITH_CANDIDATE)];
    let cancel = CancelToken::new();
    cancel.cancel();
    let result = fix_all(
        &TestAnalyzer,
        FixAllScope::Project(&documents),
        &LintConfig::default(),
        &cancel,
    );
    assert!(matches!(result, Err(AutopropError::Canceled)));
}

#[test]
fn converge_returns_none_for_clean_documents() {
    let doc = document("plain.cs", WITHOUT_CANDIDATE);
    let result = converge_document(
        &TestAnalyzer,
        &doc,
        &LintConfig::default(),
        &CancelToken::new(),
    )
    .unwrap();
    assert!(result.is_none());
}

#[test]
fn stale_candidate_is_a_no_op() {
    // A candidate captured from one tree must not edit a different tree,
    // even when the text is identical.
    let tree_a = parse(WITH_CANDIDATE);
    let model_a = TestAnalyzer.analyze(&tree_a);
    let property = model_a
        .root()
        .descendants()
        .filter_map(PropertyDecl::cast)
        .next()
        .unwrap();
    let candidate = detect(model_a.as_ref(), &property).unwrap();

    let tree_b = parse(WITH_CANDIDATE);
    let model_b = TestAnalyzer.analyze(&tree_b);
    assert!(convert_to_auto_property(model_b.as_ref(), &candidate).is_none());

    // Against its own model the same candidate applies cleanly.
    let applied = convert_to_auto_property(model_a.as_ref(), &candidate);
    assert!(applied.is_some());
}
