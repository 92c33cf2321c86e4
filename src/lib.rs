//! Syntax parser and validator for ECMAScript regular expressions.
//!
//! Patterns are checked against the grammar of a selectable language
//! edition, including the Annex-B legacy syntax, the `u` (Unicode) mode and
//! the `v` (Unicode sets) mode. [`parse`] produces a position-annotated
//! syntax tree; [`validate`] checks syntax without building one.
//!
//! ```
//! use esregex::{parse, NodeKind, ParseOptions};
//!
//! let ast = parse("(?<year>\\d{4})-\\d{2}", "u", ParseOptions::default()).unwrap();
//! let NodeKind::RegExpLiteral { pattern, .. } = &ast[ast.root()].kind else {
//!     unreachable!();
//! };
//! assert_eq!(ast[*pattern].raw, "(?<year>\\d{4})-\\d{2}");
//! ```

mod ast;
mod group_specifiers;
mod parser;
mod reader;
mod unicode;
mod validator;
mod visitor;

pub use ast::{
    Ast, BackreferenceRef, CharacterSetKind, EdgeKind, EscapeSetKind, FlagSet, LookaroundKind,
    Node, NodeId, NodeKind,
};
pub use parser::{parse, parse_pattern};
pub use validator::{RegExpSyntaxError, RegExpValidator, SyntaxHandler};
pub use visitor::{visit, visit_node, Visitor};

use validator::NullHandler;

/// The language editions whose pattern grammar can be selected. Editions
/// order by age, so version gates read as range comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EcmaVersion {
    ES5,
    ES2015,
    ES2016,
    ES2017,
    ES2018,
    ES2019,
    ES2020,
    ES2021,
    ES2022,
    ES2023,
    ES2024,
    ES2025,
}

#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Disables the Annex-B legacy syntax even without the `u` or `v` flag.
    pub strict: bool,
    pub ecma_version: EcmaVersion,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            strict: false,
            ecma_version: EcmaVersion::ES2025,
        }
    }
}

/// Validates a pattern and flags pair without building a tree.
pub fn validate(pattern: &str, flags: &str, options: ParseOptions) -> Result<(), RegExpSyntaxError> {
    let mut handler = NullHandler;
    let mut validator = RegExpValidator::new(&mut handler, options);
    let flag_set = validator.validate_flags(flags)?;
    validator.validate_pattern(pattern, flag_set)
}

/// Validates and decodes a flags text on its own.
pub fn validate_flags(flags: &str, options: ParseOptions) -> Result<FlagSet, RegExpSyntaxError> {
    let mut handler = NullHandler;
    let mut validator = RegExpValidator::new(&mut handler, options);
    validator.validate_flags(flags)
}
