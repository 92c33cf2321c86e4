/// Builds the syntax tree. [`parse`] and [`parse_pattern`] run the validator
/// with a [`TreeBuilder`] as the handler; the builder assembles arena nodes
/// from the event stream and resolves backreferences once the walk is done.
use crate::ast::{
    Ast, BackreferenceRef, CharacterSetKind, EdgeKind, EscapeSetKind, FlagSet, LookaroundKind,
    Node, NodeId, NodeKind,
};
use crate::validator::{RegExpSyntaxError, RegExpValidator, SyntaxHandler};
use crate::ParseOptions;

/// Parses a pattern and flags pair into a tree rooted at a `RegExpLiteral`.
pub fn parse(pattern: &str, flags: &str, options: ParseOptions) -> Result<Ast, RegExpSyntaxError> {
    let mut builder = TreeBuilder::new(pattern);
    let mut validator = RegExpValidator::new(&mut builder, options);
    let flag_set = validator.validate_flags(flags)?;
    validator.validate_pattern(pattern, flag_set)?;
    Ok(builder.finish_literal(pattern, flags))
}

/// Parses a standalone pattern under already-decoded flags into a tree
/// rooted at a `Pattern`.
pub fn parse_pattern(
    pattern: &str,
    flags: FlagSet,
    options: ParseOptions,
) -> Result<Ast, RegExpSyntaxError> {
    let mut builder = TreeBuilder::new(pattern);
    let mut validator = RegExpValidator::new(&mut builder, options);
    validator.validate_pattern(pattern, flags)?;
    Ok(builder.finish_pattern())
}

/// Handler that materializes validator events as arena nodes.
///
/// Container events (`*_enter`/`*_leave`) push and pop `stack`; leaf events
/// append to the open container. A pattern may be scanned twice (named
/// backreference detection), so `on_pattern_enter` drops everything built so
/// far and starts over.
struct TreeBuilder {
    chars: Vec<char>,
    nodes: Vec<Node>,
    /// Open container nodes, innermost last.
    stack: Vec<NodeId>,
    backreferences: Vec<NodeId>,
    /// Capturing groups in opening-paren order; backreference indices are
    /// 1-based positions in this list.
    capturing_groups: Vec<NodeId>,
    /// One slot per open character class: the set expression accumulated so
    /// far, when the class body is an intersection or subtraction chain.
    expr_stack: Vec<Option<NodeId>>,
    flags: Option<(usize, usize, FlagSet)>,
    root: Option<NodeId>,
}

impl TreeBuilder {
    fn new(pattern: &str) -> Self {
        TreeBuilder {
            chars: pattern.chars().collect(),
            nodes: Vec::new(),
            stack: Vec::new(),
            backreferences: Vec::new(),
            capturing_groups: Vec::new(),
            expr_stack: Vec::new(),
            flags: None,
            root: None,
        }
    }

    fn raw(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Opens a container node under the current one.
    fn enter(&mut self, start: usize, kind: NodeKind) -> NodeId {
        let parent = self.stack.last().copied();
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            start,
            end: start,
            raw: String::new(),
        });
        if let Some(parent) = parent {
            self.append_child(parent, id);
        }
        self.stack.push(id);
        id
    }

    /// Closes the innermost container, fixing its end and raw text.
    fn leave(&mut self, end: usize) -> NodeId {
        let id = self.stack.pop().expect("leave without matching enter");
        self.nodes[id.index()].end = end;
        self.nodes[id.index()].raw = self.raw(self.nodes[id.index()].start, end);
        id
    }

    fn leaf(&mut self, start: usize, end: usize, kind: NodeKind) -> NodeId {
        let parent = self.stack.last().copied();
        let raw = self.raw(start, end);
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            start,
            end,
            raw,
        });
        if let Some(parent) = parent {
            self.append_child(parent, id);
        }
        id
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        match &mut self.nodes[parent.index()].kind {
            NodeKind::Pattern { alternatives }
            | NodeKind::Group { alternatives }
            | NodeKind::CapturingGroup { alternatives, .. }
            | NodeKind::LookaroundAssertion { alternatives, .. }
            | NodeKind::ClassStringDisjunction { alternatives } => alternatives.push(child),
            NodeKind::Alternative { elements }
            | NodeKind::CharacterClass { elements, .. }
            | NodeKind::StringAlternative { elements } => elements.push(child),
            _ => unreachable!("node kind cannot own children"),
        }
    }

    fn pop_class_element(&mut self, class: NodeId) -> NodeId {
        match &mut self.nodes[class.index()].kind {
            NodeKind::CharacterClass { elements, .. } => {
                elements.pop().expect("class operand missing")
            }
            _ => unreachable!("expected an open character class"),
        }
    }

    /// Replaces the last two class elements (or the pending expression and
    /// the last element) with a binary set expression node.
    fn push_set_operation(
        &mut self,
        start: usize,
        end: usize,
        make: fn(NodeId, NodeId) -> NodeKind,
    ) {
        let class = *self.stack.last().expect("set operation outside a class");
        let right = self.pop_class_element(class);
        let left = self
            .expr_stack
            .last_mut()
            .expect("set operation outside a class")
            .take()
            .unwrap_or_else(|| self.pop_class_element(class));
        let raw = self.raw(start, end);
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind: make(left, right),
            parent: Some(class),
            start,
            end,
            raw,
        });
        self.nodes[left.index()].parent = Some(id);
        self.nodes[right.index()].parent = Some(id);
        *self
            .expr_stack
            .last_mut()
            .expect("set operation outside a class") = Some(id);
    }

    fn resolve_backreferences(&mut self) {
        let backreferences = std::mem::take(&mut self.backreferences);
        for id in &backreferences {
            let target = match &self.nodes[id.index()].kind {
                NodeKind::Backreference { target, .. } => target.clone(),
                _ => unreachable!("expected a backreference node"),
            };
            let group = match &target {
                BackreferenceRef::Index(n) => self.capturing_groups[n - 1],
                BackreferenceRef::Name(name) => self
                    .capturing_groups
                    .iter()
                    .copied()
                    .find(|g| {
                        matches!(
                            &self.nodes[g.index()].kind,
                            NodeKind::CapturingGroup { name: Some(n), .. } if n == name
                        )
                    })
                    .expect("validated group name"),
            };
            if let NodeKind::Backreference { resolved, .. } = &mut self.nodes[id.index()].kind {
                *resolved = Some(group);
            }
            if let NodeKind::CapturingGroup { references, .. } =
                &mut self.nodes[group.index()].kind
            {
                references.push(*id);
            }
        }
        self.backreferences = backreferences;
    }

    fn finish_literal(mut self, pattern: &str, flags_text: &str) -> Ast {
        let pattern_node = self.root.expect("pattern was not parsed");
        let (flags_start, flags_end, flag_set) = self.flags.expect("flags were not validated");
        let flags_node = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind: NodeKind::Flags(flag_set),
            parent: None,
            start: flags_start,
            end: flags_end,
            raw: flags_text.to_string(),
        });
        let raw = format!("/{pattern}/{flags_text}");
        let end = raw.chars().count();
        let root = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind: NodeKind::RegExpLiteral {
                pattern: pattern_node,
                flags: flags_node,
            },
            parent: None,
            start: 0,
            end,
            raw,
        });
        self.nodes[pattern_node.index()].parent = Some(root);
        self.nodes[flags_node.index()].parent = Some(root);
        Ast::from_parts(self.nodes, root)
    }

    fn finish_pattern(self) -> Ast {
        let root = self.root.expect("pattern was not parsed");
        Ast::from_parts(self.nodes, root)
    }
}

impl SyntaxHandler for TreeBuilder {
    fn on_flags(&mut self, start: usize, end: usize, flags: FlagSet) {
        self.flags = Some((start, end, flags));
    }

    fn on_pattern_enter(&mut self, start: usize) {
        self.nodes.clear();
        self.stack.clear();
        self.backreferences.clear();
        self.capturing_groups.clear();
        self.expr_stack.clear();
        self.root = None;
        self.enter(
            start,
            NodeKind::Pattern {
                alternatives: Vec::new(),
            },
        );
    }

    fn on_pattern_leave(&mut self, _start: usize, end: usize) {
        let id = self.leave(end);
        self.resolve_backreferences();
        self.root = Some(id);
    }

    fn on_alternative_enter(&mut self, start: usize, _index: usize) {
        self.enter(
            start,
            NodeKind::Alternative {
                elements: Vec::new(),
            },
        );
    }

    fn on_alternative_leave(&mut self, _start: usize, end: usize, _index: usize) {
        self.leave(end);
    }

    fn on_group_enter(&mut self, start: usize) {
        self.enter(
            start,
            NodeKind::Group {
                alternatives: Vec::new(),
            },
        );
    }

    fn on_group_leave(&mut self, _start: usize, end: usize) {
        self.leave(end);
    }

    fn on_capturing_group_enter(&mut self, start: usize, name: Option<&str>) {
        let id = self.enter(
            start,
            NodeKind::CapturingGroup {
                name: name.map(str::to_string),
                alternatives: Vec::new(),
                references: Vec::new(),
            },
        );
        self.capturing_groups.push(id);
    }

    fn on_capturing_group_leave(&mut self, _start: usize, end: usize, _name: Option<&str>) {
        self.leave(end);
    }

    fn on_quantifier(
        &mut self,
        _start: usize,
        end: usize,
        min: usize,
        max: Option<usize>,
        greedy: bool,
    ) {
        // wrap the last element of the open alternative
        let alternative = *self.stack.last().expect("quantifier outside an alternative");
        let element = match &mut self.nodes[alternative.index()].kind {
            NodeKind::Alternative { elements } => {
                elements.pop().expect("quantifier without an operand")
            }
            _ => unreachable!("expected an open alternative"),
        };
        let start = self.nodes[element.index()].start;
        let raw = self.raw(start, end);
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind: NodeKind::Quantifier {
                min,
                max,
                greedy,
                element,
            },
            parent: Some(alternative),
            start,
            end,
            raw,
        });
        self.nodes[element.index()].parent = Some(id);
        if let NodeKind::Alternative { elements } = &mut self.nodes[alternative.index()].kind {
            elements.push(id);
        }
    }

    fn on_lookaround_assertion_enter(&mut self, start: usize, kind: LookaroundKind, negate: bool) {
        self.enter(
            start,
            NodeKind::LookaroundAssertion {
                kind,
                negate,
                alternatives: Vec::new(),
            },
        );
    }

    fn on_lookaround_assertion_leave(
        &mut self,
        _start: usize,
        end: usize,
        _kind: LookaroundKind,
        _negate: bool,
    ) {
        self.leave(end);
    }

    fn on_edge_assertion(&mut self, start: usize, end: usize, kind: EdgeKind) {
        self.leaf(start, end, NodeKind::EdgeAssertion { kind });
    }

    fn on_word_boundary_assertion(&mut self, start: usize, end: usize, negate: bool) {
        self.leaf(start, end, NodeKind::WordBoundaryAssertion { negate });
    }

    fn on_any_character_set(&mut self, start: usize, end: usize) {
        self.leaf(start, end, NodeKind::CharacterSet(CharacterSetKind::Any));
    }

    fn on_escape_character_set(
        &mut self,
        start: usize,
        end: usize,
        kind: EscapeSetKind,
        negate: bool,
    ) {
        self.leaf(
            start,
            end,
            NodeKind::CharacterSet(CharacterSetKind::Escape { kind, negate }),
        );
    }

    fn on_unicode_property_character_set(
        &mut self,
        start: usize,
        end: usize,
        key: &str,
        value: Option<&str>,
        negate: bool,
        strings: bool,
    ) {
        self.leaf(
            start,
            end,
            NodeKind::CharacterSet(CharacterSetKind::Property {
                key: key.to_string(),
                value: value.map(str::to_string),
                strings,
                negate,
            }),
        );
    }

    fn on_character(&mut self, start: usize, end: usize, value: u32) {
        self.leaf(start, end, NodeKind::Character { value });
    }

    fn on_backreference_index(&mut self, start: usize, end: usize, index: usize) {
        let id = self.leaf(
            start,
            end,
            NodeKind::Backreference {
                target: BackreferenceRef::Index(index),
                resolved: None,
            },
        );
        self.backreferences.push(id);
    }

    fn on_backreference_name(&mut self, start: usize, end: usize, name: &str) {
        let id = self.leaf(
            start,
            end,
            NodeKind::Backreference {
                target: BackreferenceRef::Name(name.to_string()),
                resolved: None,
            },
        );
        self.backreferences.push(id);
    }

    fn on_character_class_enter(&mut self, start: usize, negate: bool, unicode_sets: bool) {
        self.enter(
            start,
            NodeKind::CharacterClass {
                unicode_sets,
                negate,
                elements: Vec::new(),
            },
        );
        self.expr_stack.push(None);
    }

    fn on_character_class_leave(&mut self, _start: usize, end: usize, _negate: bool) {
        let pending = self.expr_stack.pop().expect("class leave without enter");
        let id = self.leave(end);
        if let Some(expression) = pending {
            // the body was a set operation chain, not a union
            let negate = match &self.nodes[id.index()].kind {
                NodeKind::CharacterClass { negate, .. } => *negate,
                _ => unreachable!("expected a character class"),
            };
            self.nodes[id.index()].kind = NodeKind::ExpressionCharacterClass { negate, expression };
        }
    }

    fn on_character_class_range(&mut self, start: usize, end: usize, _min: u32, _max: u32) {
        let class = *self.stack.last().expect("range outside a class");
        let unicode_sets = matches!(
            self.nodes[class.index()].kind,
            NodeKind::CharacterClass {
                unicode_sets: true,
                ..
            }
        );
        let mut max = self.pop_class_element(class);
        if !unicode_sets {
            // the hyphen between the bounds was reported as a character;
            // drop its node from the arena (it sits right before `max`)
            self.pop_class_element(class);
            self.nodes.remove(max.index() - 1);
            max = NodeId::new(max.index() - 1);
        }
        let min = self.pop_class_element(class);
        let raw = self.raw(start, end);
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind: NodeKind::CharacterClassRange { min, max },
            parent: Some(class),
            start,
            end,
            raw,
        });
        self.nodes[min.index()].parent = Some(id);
        self.nodes[max.index()].parent = Some(id);
        if let NodeKind::CharacterClass { elements, .. } = &mut self.nodes[class.index()].kind {
            elements.push(id);
        }
    }

    fn on_class_intersection(&mut self, start: usize, end: usize) {
        self.push_set_operation(start, end, |left, right| NodeKind::ClassIntersection {
            left,
            right,
        });
    }

    fn on_class_subtraction(&mut self, start: usize, end: usize) {
        self.push_set_operation(start, end, |left, right| NodeKind::ClassSubtraction {
            left,
            right,
        });
    }

    fn on_class_string_disjunction_enter(&mut self, start: usize) {
        self.enter(
            start,
            NodeKind::ClassStringDisjunction {
                alternatives: Vec::new(),
            },
        );
    }

    fn on_class_string_disjunction_leave(&mut self, _start: usize, end: usize) {
        self.leave(end);
    }

    fn on_string_alternative_enter(&mut self, start: usize, _index: usize) {
        self.enter(
            start,
            NodeKind::StringAlternative {
                elements: Vec::new(),
            },
        );
    }

    fn on_string_alternative_leave(&mut self, _start: usize, end: usize, _index: usize) {
        self.leave(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(pattern: &str, flags: &str) -> Ast {
        parse(pattern, flags, ParseOptions::default()).unwrap()
    }

    fn pattern_of(ast: &Ast) -> NodeId {
        match &ast[ast.root()].kind {
            NodeKind::RegExpLiteral { pattern, .. } => *pattern,
            NodeKind::Pattern { .. } => ast.root(),
            _ => panic!("unexpected root"),
        }
    }

    /// The elements of the first alternative of the pattern.
    fn first_alternative(ast: &Ast) -> Vec<NodeId> {
        let NodeKind::Pattern { alternatives } = &ast[pattern_of(ast)].kind else {
            panic!("expected a pattern");
        };
        let NodeKind::Alternative { elements } = &ast[alternatives[0]].kind else {
            panic!("expected an alternative");
        };
        elements.clone()
    }

    #[test]
    fn literal_shape() {
        let ast = parse_ok("a|b", "gi");
        let NodeKind::RegExpLiteral { pattern, flags } = &ast[ast.root()].kind else {
            panic!("expected a literal root");
        };
        assert_eq!(ast[ast.root()].raw, "/a|b/gi");
        assert_eq!(ast[*pattern].raw, "a|b");
        let NodeKind::Pattern { alternatives } = &ast[*pattern].kind else {
            panic!("expected a pattern");
        };
        assert_eq!(alternatives.len(), 2);
        let NodeKind::Flags(set) = &ast[*flags].kind else {
            panic!("expected flags");
        };
        assert!(set.global && set.ignore_case && !set.multiline);
        assert_eq!(ast[*flags].raw, "gi");
    }

    #[test]
    fn parse_pattern_roots_at_pattern() {
        let ast = parse_pattern("ab", FlagSet::default(), ParseOptions::default()).unwrap();
        assert!(matches!(&ast[ast.root()].kind, NodeKind::Pattern { .. }));
        assert_eq!(ast[ast.root()].raw, "ab");
        assert!(ast[ast.root()].parent.is_none());
    }

    #[test]
    fn spans_and_raws() {
        let ast = parse_ok("a(bc)d", "");
        let elements = first_alternative(&ast);
        assert_eq!(elements.len(), 3);
        let group = &ast[elements[1]];
        assert!(matches!(&group.kind, NodeKind::CapturingGroup { .. }));
        assert_eq!((group.start, group.end), (1, 5));
        assert_eq!(group.raw, "(bc)");
        assert_eq!(ast[elements[2]].raw, "d");
    }

    #[test]
    fn quantifier_wraps_last_element() {
        let ast = parse_ok("ab+?", "");
        let elements = first_alternative(&ast);
        assert_eq!(elements.len(), 2);
        let quantifier = &ast[elements[1]];
        let NodeKind::Quantifier {
            min,
            max,
            greedy,
            element,
        } = &quantifier.kind
        else {
            panic!("expected a quantifier");
        };
        assert_eq!((*min, *max, *greedy), (1, None, false));
        assert_eq!(quantifier.raw, "b+?");
        assert!(matches!(
            &ast[*element].kind,
            NodeKind::Character { value } if *value == 'b' as u32
        ));
        assert_eq!(ast[*element].parent, Some(elements[1]));
    }

    #[test]
    fn braced_quantifier_bounds() {
        let ast = parse_ok("a{2,4}", "u");
        let elements = first_alternative(&ast);
        assert!(matches!(
            &ast[elements[0]].kind,
            NodeKind::Quantifier {
                min: 2,
                max: Some(4),
                greedy: true,
                ..
            }
        ));
        let ast = parse_ok("a{3,}", "u");
        let elements = first_alternative(&ast);
        assert!(matches!(
            &ast[elements[0]].kind,
            NodeKind::Quantifier {
                min: 3,
                max: None,
                ..
            }
        ));
    }

    #[test]
    fn indexed_backreference_resolution() {
        let ast = parse_ok("(a)\\1", "u");
        let elements = first_alternative(&ast);
        let group = elements[0];
        let backref = elements[1];
        let NodeKind::Backreference { target, resolved } = &ast[backref].kind else {
            panic!("expected a backreference");
        };
        assert_eq!(*target, BackreferenceRef::Index(1));
        assert_eq!(*resolved, Some(group));
        let NodeKind::CapturingGroup { references, .. } = &ast[group].kind else {
            panic!("expected a capturing group");
        };
        assert_eq!(references.as_slice(), &[backref]);
    }

    #[test]
    fn named_backreference_resolution() {
        let ast = parse_ok("(?<x>a)\\k<x>", "u");
        let elements = first_alternative(&ast);
        let NodeKind::Backreference { target, resolved } = &ast[elements[1]].kind else {
            panic!("expected a backreference");
        };
        assert_eq!(*target, BackreferenceRef::Name("x".to_string()));
        assert_eq!(*resolved, Some(elements[0]));
        assert!(matches!(
            &ast[elements[0]].kind,
            NodeKind::CapturingGroup { name: Some(n), .. } if n == "x"
        ));
    }

    #[test]
    fn rescanned_pattern_builds_a_single_tree() {
        // without the u flag, `\k<x>` only becomes a backreference once the
        // named group is seen, which triggers a second scan
        let ast = parse_ok("\\k<x>(?<x>a)", "");
        let elements = first_alternative(&ast);
        assert_eq!(elements.len(), 2);
        let NodeKind::Backreference { resolved, .. } = &ast[elements[0]].kind else {
            panic!("expected a backreference");
        };
        assert_eq!(*resolved, Some(elements[1]));
    }

    #[test]
    fn class_ranges_and_characters() {
        let ast = parse_ok("[a-z_]", "u");
        let elements = first_alternative(&ast);
        let NodeKind::CharacterClass {
            unicode_sets,
            negate,
            elements: members,
        } = &ast[elements[0]].kind
        else {
            panic!("expected a character class");
        };
        assert!(!unicode_sets && !negate);
        assert_eq!(members.len(), 2);
        let range = &ast[members[0]];
        let NodeKind::CharacterClassRange { min, max } = &range.kind else {
            panic!("expected a range");
        };
        assert_eq!(range.raw, "a-z");
        assert!(matches!(&ast[*min].kind, NodeKind::Character { value } if *value == 'a' as u32));
        assert!(matches!(&ast[*max].kind, NodeKind::Character { value } if *value == 'z' as u32));
        assert!(matches!(
            &ast[members[1]].kind,
            NodeKind::Character { value } if *value == '_' as u32
        ));
    }

    #[test]
    fn trailing_hyphen_stays_a_character() {
        let ast = parse_ok("[a-]", "u");
        let elements = first_alternative(&ast);
        let NodeKind::CharacterClass {
            elements: members, ..
        } = &ast[elements[0]].kind
        else {
            panic!("expected a character class");
        };
        assert_eq!(members.len(), 2);
        assert!(matches!(
            &ast[members[1]].kind,
            NodeKind::Character { value } if *value == '-' as u32
        ));
    }

    #[test]
    fn set_escape_next_to_hyphen_is_not_a_range() {
        // tolerated outside u mode; all three stay separate elements
        let ast = parse_ok("[\\d-z]", "");
        let elements = first_alternative(&ast);
        let NodeKind::CharacterClass {
            elements: members, ..
        } = &ast[elements[0]].kind
        else {
            panic!("expected a character class");
        };
        assert_eq!(members.len(), 3);
        assert!(matches!(
            &ast[members[0]].kind,
            NodeKind::CharacterSet(CharacterSetKind::Escape {
                kind: EscapeSetKind::Digit,
                negate: false,
            })
        ));
    }

    #[test]
    fn v_mode_class_carries_unicode_sets() {
        let ast = parse_ok("[a]", "v");
        let elements = first_alternative(&ast);
        assert!(matches!(
            &ast[elements[0]].kind,
            NodeKind::CharacterClass {
                unicode_sets: true,
                ..
            }
        ));
    }

    #[test]
    fn subtraction_expression_class() {
        let ast = parse_ok("[a--b]", "v");
        let elements = first_alternative(&ast);
        let class = &ast[elements[0]];
        assert_eq!(class.raw, "[a--b]");
        let NodeKind::ExpressionCharacterClass { negate, expression } = &class.kind else {
            panic!("expected an expression class");
        };
        assert!(!negate);
        let NodeKind::ClassSubtraction { left, right } = &ast[*expression].kind else {
            panic!("expected a subtraction");
        };
        assert!(matches!(&ast[*left].kind, NodeKind::Character { value } if *value == 'a' as u32));
        assert!(matches!(&ast[*right].kind, NodeKind::Character { value } if *value == 'b' as u32));
        assert_eq!(ast[*expression].parent, Some(elements[0]));
    }

    #[test]
    fn chained_intersection_nests_to_the_left() {
        let ast = parse_ok("[a&&b&&c]", "v");
        let elements = first_alternative(&ast);
        let NodeKind::ExpressionCharacterClass { expression, .. } = &ast[elements[0]].kind else {
            panic!("expected an expression class");
        };
        let NodeKind::ClassIntersection { left, right } = &ast[*expression].kind else {
            panic!("expected an intersection");
        };
        assert!(matches!(
            &ast[*left].kind,
            NodeKind::ClassIntersection { .. }
        ));
        assert!(matches!(&ast[*right].kind, NodeKind::Character { value } if *value == 'c' as u32));
    }

    #[test]
    fn nested_class_operand() {
        let ast = parse_ok("[[a-z]--[aeiou]]", "v");
        let elements = first_alternative(&ast);
        let NodeKind::ExpressionCharacterClass { expression, .. } = &ast[elements[0]].kind else {
            panic!("expected an expression class");
        };
        let NodeKind::ClassSubtraction { left, right } = &ast[*expression].kind else {
            panic!("expected a subtraction");
        };
        assert!(matches!(
            &ast[*left].kind,
            NodeKind::CharacterClass {
                unicode_sets: true,
                ..
            }
        ));
        assert_eq!(ast[*right].raw, "[aeiou]");
    }

    #[test]
    fn string_disjunction_shape() {
        let ast = parse_ok("[\\q{ab|c}]", "v");
        let elements = first_alternative(&ast);
        let NodeKind::CharacterClass {
            elements: members, ..
        } = &ast[elements[0]].kind
        else {
            panic!("expected a character class");
        };
        let disjunction = &ast[members[0]];
        assert_eq!(disjunction.raw, "\\q{ab|c}");
        let NodeKind::ClassStringDisjunction { alternatives } = &disjunction.kind else {
            panic!("expected a string disjunction");
        };
        assert_eq!(alternatives.len(), 2);
        let NodeKind::StringAlternative { elements: chars } = &ast[alternatives[0]].kind else {
            panic!("expected a string alternative");
        };
        assert_eq!(chars.len(), 2);
        assert_eq!(ast[alternatives[0]].raw, "ab");
    }

    #[test]
    fn lookaround_kinds() {
        let ast = parse_ok("(?<!x)", "u");
        let elements = first_alternative(&ast);
        assert!(matches!(
            &ast[elements[0]].kind,
            NodeKind::LookaroundAssertion {
                kind: LookaroundKind::Lookbehind,
                negate: true,
                ..
            }
        ));
    }

    #[test]
    fn character_sets() {
        let ast = parse_ok(".\\d\\p{Lu}", "u");
        let elements = first_alternative(&ast);
        assert!(matches!(
            &ast[elements[0]].kind,
            NodeKind::CharacterSet(CharacterSetKind::Any)
        ));
        assert!(matches!(
            &ast[elements[1]].kind,
            NodeKind::CharacterSet(CharacterSetKind::Escape {
                kind: EscapeSetKind::Digit,
                negate: false,
            })
        ));
        let NodeKind::CharacterSet(CharacterSetKind::Property {
            key,
            value,
            strings,
            negate,
        }) = &ast[elements[2]].kind
        else {
            panic!("expected a property set");
        };
        assert_eq!(key, "General_Category");
        assert_eq!(value.as_deref(), Some("Lu"));
        assert!(!strings && !negate);
    }

    #[test]
    fn property_of_strings_node() {
        let ast = parse_ok("\\p{RGI_Emoji}", "v");
        let elements = first_alternative(&ast);
        assert!(matches!(
            &ast[elements[0]].kind,
            NodeKind::CharacterSet(CharacterSetKind::Property {
                strings: true,
                negate: false,
                ..
            })
        ));
    }

    #[test]
    fn surrogate_pair_escape_is_one_character_in_unicode_mode() {
        let ast = parse_ok("\\uD83D\\uDE00", "u");
        let elements = first_alternative(&ast);
        assert_eq!(elements.len(), 1);
        assert!(matches!(
            &ast[elements[0]].kind,
            NodeKind::Character { value: 0x1F600 }
        ));
        assert_eq!(ast[elements[0]].raw, "\\uD83D\\uDE00");

        let ast = parse_ok("\\uD83D\\uDE00", "");
        assert_eq!(first_alternative(&ast).len(), 2);
    }

    #[test]
    fn edge_and_word_boundary_assertions() {
        let ast = parse_ok("^a\\b$", "u");
        let elements = first_alternative(&ast);
        assert!(matches!(
            &ast[elements[0]].kind,
            NodeKind::EdgeAssertion {
                kind: EdgeKind::Start
            }
        ));
        assert!(matches!(
            &ast[elements[2]].kind,
            NodeKind::WordBoundaryAssertion { negate: false }
        ));
        assert!(matches!(
            &ast[elements[3]].kind,
            NodeKind::EdgeAssertion { kind: EdgeKind::End }
        ));
    }

    #[test]
    fn every_node_has_a_parent_except_roots() {
        let ast = parse_ok("a(?:b|[c-d])+\\1(e)", "u");
        let root = ast.root();
        for (id, node) in ast.nodes() {
            if id == root || matches!(node.kind, NodeKind::Flags(_)) {
                continue;
            }
            assert!(node.parent.is_some(), "orphan node {:?}", node.kind);
        }
    }

    #[test]
    fn parse_errors_surface() {
        assert!(parse("(", "", ParseOptions::default()).is_err());
        assert!(parse("a", "x", ParseOptions::default()).is_err());
    }

    /// Flattens a subtree to (span re-based to `base`, raw, kind) rows in
    /// visit order, for shape comparisons across trees.
    struct Shape {
        base: usize,
        rows: Vec<(usize, usize, String, std::mem::Discriminant<NodeKind>)>,
    }

    impl crate::visitor::Visitor for Shape {
        fn enter(&mut self, ast: &Ast, id: NodeId) {
            let node = &ast[id];
            self.rows.push((
                node.start - self.base,
                node.end - self.base,
                node.raw.clone(),
                std::mem::discriminant(&node.kind),
            ));
        }
    }

    fn shape_of(ast: &Ast, id: NodeId, base: usize) -> Vec<(usize, usize, String, std::mem::Discriminant<NodeKind>)> {
        let mut shape = Shape { base, rows: Vec::new() };
        crate::visitor::visit_node(ast, id, &mut shape);
        shape.rows
    }

    #[test]
    fn subtree_raw_reparses_to_an_isomorphic_tree() {
        let ast = parse_ok("a(b|c+)d", "u");
        let elements = first_alternative(&ast);
        let group = &ast[elements[1]];
        assert_eq!(group.raw, "(b|c+)");

        let flags = FlagSet {
            unicode: true,
            ..FlagSet::default()
        };
        let reparsed = parse_pattern(&group.raw, flags, ParseOptions::default()).unwrap();
        let NodeKind::Pattern { alternatives } = &reparsed[reparsed.root()].kind else {
            panic!("expected a pattern");
        };
        let NodeKind::Alternative { elements: inner } = &reparsed[alternatives[0]].kind else {
            panic!("expected an alternative");
        };
        assert_eq!(inner.len(), 1);

        // same shape, values and raws, with spans re-based to zero
        assert_eq!(
            shape_of(&ast, elements[1], group.start),
            shape_of(&reparsed, inner[0], 0)
        );
    }
}
