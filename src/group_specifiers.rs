/// Tracking of capturing group names during the grammar walk.
///
/// Before ES2025 a name may appear only once per pattern. From ES2025 a name
/// may be reused across alternatives of a disjunction but not where both
/// occurrences can participate in the same match, so the scoped tracker
/// forks the visible set on entering an alternative and merges the names a
/// disjunction added back into the enclosing scope when it closes.
use rustc_hash::FxHashSet;

pub(crate) trait GroupSpecifiers {
    fn clear(&mut self);
    fn is_empty(&self) -> bool;
    fn enter_disjunction(&mut self);
    fn leave_disjunction(&mut self);
    fn enter_alternative(&mut self);
    fn leave_alternative(&mut self);
    /// Whether the name was declared anywhere in the pattern.
    fn has_in_pattern(&self, name: &str) -> bool;
    /// Whether a group with this name is visible at the current position.
    fn has_in_scope(&self, name: &str) -> bool;
    fn add_to_scope(&mut self, name: &str);
}

/// Pre-ES2025 policy: one flat set, every duplicate is an error.
#[derive(Default)]
pub(crate) struct FlatGroupSpecifiers {
    names: FxHashSet<String>,
}

impl FlatGroupSpecifiers {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl GroupSpecifiers for FlatGroupSpecifiers {
    fn clear(&mut self) {
        self.names.clear();
    }

    fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn enter_disjunction(&mut self) {}
    fn leave_disjunction(&mut self) {}
    fn enter_alternative(&mut self) {}
    fn leave_alternative(&mut self) {}

    fn has_in_pattern(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn has_in_scope(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn add_to_scope(&mut self, name: &str) {
        self.names.insert(name.to_string());
    }
}

/// ES2025 policy: names are scoped per alternative.
///
/// `visible` is the set a new group is checked against. Entering an
/// alternative saves the current visible set; leaving restores it, so
/// sibling alternatives do not see each other's names. Each open disjunction
/// also accumulates the names declared anywhere inside it (`added`); when
/// the disjunction closes, those names become visible to everything after
/// it, which is what rejects `((?<a>x)|y)(?<a>z)` while still allowing
/// `(?<a>x)|(?<a>y)`.
#[derive(Default)]
pub(crate) struct ScopedGroupSpecifiers {
    visible: FxHashSet<String>,
    saved_visible: Vec<FxHashSet<String>>,
    added: FxHashSet<String>,
    saved_added: Vec<FxHashSet<String>>,
    in_pattern: FxHashSet<String>,
}

impl ScopedGroupSpecifiers {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl GroupSpecifiers for ScopedGroupSpecifiers {
    fn clear(&mut self) {
        self.visible.clear();
        self.saved_visible.clear();
        self.added.clear();
        self.saved_added.clear();
        self.in_pattern.clear();
    }

    fn is_empty(&self) -> bool {
        self.in_pattern.is_empty()
    }

    fn enter_disjunction(&mut self) {
        self.saved_added.push(std::mem::take(&mut self.added));
    }

    fn leave_disjunction(&mut self) {
        let closed = std::mem::replace(
            &mut self.added,
            self.saved_added.pop().expect("unbalanced disjunction scope"),
        );
        for name in closed {
            self.visible.insert(name.clone());
            self.added.insert(name);
        }
    }

    fn enter_alternative(&mut self) {
        self.saved_visible.push(self.visible.clone());
    }

    fn leave_alternative(&mut self) {
        self.visible = self
            .saved_visible
            .pop()
            .expect("unbalanced alternative scope");
    }

    fn has_in_pattern(&self, name: &str) -> bool {
        self.in_pattern.contains(name)
    }

    fn has_in_scope(&self, name: &str) -> bool {
        self.visible.contains(name)
    }

    fn add_to_scope(&mut self, name: &str) {
        self.visible.insert(name.to_string());
        self.added.insert(name.to_string());
        self.in_pattern.insert(name.to_string());
    }
}
