/// Depth-first traversal over a parsed tree.
///
/// Implementors override [`Visitor::enter`] and [`Visitor::leave`] and match
/// on the node kind; children are visited in source order between the two
/// calls. The `resolved` and `references` links of backreferences and
/// capturing groups are cross edges, not children, so they are never
/// traversed.
use crate::ast::{Ast, NodeId, NodeKind};

pub trait Visitor {
    fn enter(&mut self, _ast: &Ast, _id: NodeId) {}
    fn leave(&mut self, _ast: &Ast, _id: NodeId) {}
}

/// Visits the whole tree starting at the root.
pub fn visit<V: Visitor>(ast: &Ast, visitor: &mut V) {
    visit_node(ast, ast.root(), visitor);
}

/// Visits the subtree rooted at `id`.
pub fn visit_node<V: Visitor>(ast: &Ast, id: NodeId, visitor: &mut V) {
    visitor.enter(ast, id);
    match &ast[id].kind {
        NodeKind::RegExpLiteral { pattern, flags } => {
            visit_node(ast, *pattern, visitor);
            visit_node(ast, *flags, visitor);
        }
        NodeKind::Pattern { alternatives }
        | NodeKind::Group { alternatives }
        | NodeKind::CapturingGroup { alternatives, .. }
        | NodeKind::LookaroundAssertion { alternatives, .. }
        | NodeKind::ClassStringDisjunction { alternatives } => {
            for alternative in alternatives {
                visit_node(ast, *alternative, visitor);
            }
        }
        NodeKind::Alternative { elements }
        | NodeKind::CharacterClass { elements, .. }
        | NodeKind::StringAlternative { elements } => {
            for element in elements {
                visit_node(ast, *element, visitor);
            }
        }
        NodeKind::Quantifier { element, .. } => {
            visit_node(ast, *element, visitor);
        }
        NodeKind::CharacterClassRange { min, max } => {
            visit_node(ast, *min, visitor);
            visit_node(ast, *max, visitor);
        }
        NodeKind::ExpressionCharacterClass { expression, .. } => {
            visit_node(ast, *expression, visitor);
        }
        NodeKind::ClassIntersection { left, right }
        | NodeKind::ClassSubtraction { left, right } => {
            visit_node(ast, *left, visitor);
            visit_node(ast, *right, visitor);
        }
        NodeKind::EdgeAssertion { .. }
        | NodeKind::WordBoundaryAssertion { .. }
        | NodeKind::CharacterSet(_)
        | NodeKind::Character { .. }
        | NodeKind::Backreference { .. }
        | NodeKind::Flags(_) => {}
    }
    visitor.leave(ast, id);
}
