/// AST node types for ECMAScript regular expressions.
/// Nodes live in an arena owned by [`Ast`]; `parent`, `resolved` and
/// `references` are non-owning [`NodeId`] handles into the same arena, so
/// the back edges cannot form ownership cycles.
use std::ops::Index;

/// Handle to a node inside an [`Ast`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A finished, immutable syntax tree. The root is a `RegExpLiteral` for full
/// parses and a `Pattern` for standalone pattern parses.
#[derive(Clone, Debug)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Ast { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i), n))
    }
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    /// Back-pointer to the owning node; `None` only for the root.
    pub parent: Option<NodeId>,
    /// 0-based character offset where this node starts.
    pub start: usize,
    /// 0-based character offset where this node ends (exclusive).
    pub end: usize,
    /// The exact source text this node spans.
    pub raw: String,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    /// The root of a full parse. Spans the assembled `/pattern/flags` text.
    RegExpLiteral { pattern: NodeId, flags: NodeId },
    /// The disjunction between the delimiters, e.g. `a|b` of `/a|b/`.
    Pattern { alternatives: Vec<NodeId> },
    /// One branch of a disjunction; a concatenation of elements.
    Alternative { elements: Vec<NodeId> },
    /// Non-capturing group, e.g. `(?:ab)`.
    Group { alternatives: Vec<NodeId> },
    /// Capturing group, e.g. `(ab)`, `(?<name>ab)`. `references` collects the
    /// backreferences resolved to this group.
    CapturingGroup {
        name: Option<String>,
        alternatives: Vec<NodeId>,
        references: Vec<NodeId>,
    },
    /// Lookahead or lookbehind, e.g. `(?=ab)`, `(?<!ab)`.
    LookaroundAssertion {
        kind: LookaroundKind,
        negate: bool,
        alternatives: Vec<NodeId>,
    },
    /// `^` or `$`.
    EdgeAssertion { kind: EdgeKind },
    /// `\b` or `\B`.
    WordBoundaryAssertion { negate: bool },
    /// E.g. `a?`, `a*`, `a{1,2}`, `a{3,}?`. `max` is `None` when unbounded.
    Quantifier {
        min: usize,
        max: Option<usize>,
        greedy: bool,
        element: NodeId,
    },
    /// `[...]` or `[^...]`. With `unicode_sets` set this is the `v`-mode
    /// class that may contain nested classes and string disjunctions;
    /// otherwise it is the class-ranges grammar and never contains strings.
    CharacterClass {
        unicode_sets: bool,
        negate: bool,
        elements: Vec<NodeId>,
    },
    /// E.g. `a-z` within a class. `min` and `max` are `Character` nodes.
    CharacterClassRange { min: NodeId, max: NodeId },
    /// `.`, `\d`-style escapes, and `\p{...}` property escapes.
    CharacterSet(CharacterSetKind),
    /// `v`-mode class whose body is one set expression, e.g. `[a--b]`.
    ExpressionCharacterClass { negate: bool, expression: NodeId },
    /// `a&&b`. Chains are left-associative: `a&&b&&c` nests as `(a&&b)&&c`.
    ClassIntersection { left: NodeId, right: NodeId },
    /// `a--b`. Chains nest like intersections.
    ClassSubtraction { left: NodeId, right: NodeId },
    /// `\q{a|bc}`.
    ClassStringDisjunction { alternatives: Vec<NodeId> },
    /// One branch of a `\q{...}`; a sequence of `Character` nodes.
    StringAlternative { elements: Vec<NodeId> },
    /// A single character, including escape sequences denoting one.
    /// `value` is a code point and may be a lone surrogate.
    Character { value: u32 },
    /// `\1` or `\k<name>`. `resolved` is bound during finalization.
    Backreference {
        target: BackreferenceRef,
        resolved: Option<NodeId>,
    },
    Flags(FlagSet),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookaroundKind {
    Lookahead,
    Lookbehind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharacterSetKind {
    /// The dot.
    Any,
    /// `\d`, `\D`, `\s`, `\S`, `\w`, `\W`.
    Escape { kind: EscapeSetKind, negate: bool },
    /// `\p{...}` / `\P{...}`. `strings` marks a property of strings, which
    /// is never negated.
    Property {
        key: String,
        value: Option<String>,
        strings: bool,
        negate: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeSetKind {
    Digit,
    Space,
    Word,
}

/// How a backreference names its target group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackreferenceRef {
    /// 1-based index of the capturing group in opening-paren order.
    Index(usize),
    Name(String),
}

/// The decoded flag letters. Each letter occurs at most once and
/// `unicode`/`unicode_sets` are mutually exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlagSet {
    pub dot_all: bool,
    pub global: bool,
    pub has_indices: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub sticky: bool,
    pub unicode: bool,
    pub unicode_sets: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_set_default_is_all_clear() {
        let flags = FlagSet::default();
        assert!(!flags.global && !flags.unicode && !flags.unicode_sets);
    }

    #[test]
    fn node_id_round_trips_index() {
        assert_eq!(NodeId::new(7).index(), 7);
    }
}
