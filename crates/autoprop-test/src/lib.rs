//! Test host for the autoprop engine
//!
//! The engine consumes syntax trees and semantic models from its host and
//! never parses source itself. This crate plays the host role for the test
//! suites: a lexer and parser for the C# subset the fixtures use, and a
//! binder implementing the semantic facade. None of this ships in the
//! engine; production hosts bring their own compiler frontend.

pub mod binder;
pub mod lexer;
pub mod parser;

pub use binder::TestAnalyzer;
pub use parser::parse;
