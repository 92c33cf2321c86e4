/// The grammar engine. [`RegExpValidator`] walks a pattern with the
/// edition-selected grammar and reports everything it finds to a
/// [`SyntaxHandler`]; validation alone uses a handler that ignores every
/// event, while the parser builds nodes from them.
use std::fmt;

use rustc_hash::FxHashSet;

use crate::ast::{EdgeKind, EscapeSetKind, FlagSet, LookaroundKind};
use crate::group_specifiers::{FlatGroupSpecifiers, GroupSpecifiers, ScopedGroupSpecifiers};
use crate::reader::Reader;
use crate::unicode::{self, properties};
use crate::{EcmaVersion, ParseOptions};

/// A syntax error with the character index it was detected at. The index is
/// into the pattern text for pattern errors and into the flags text for flag
/// errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegExpSyntaxError {
    pub message: String,
    pub index: usize,
}

impl RegExpSyntaxError {
    pub(crate) fn new(index: usize, message: impl Into<String>) -> Self {
        RegExpSyntaxError {
            message: message.into(),
            index,
        }
    }
}

impl fmt::Display for RegExpSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SyntaxError: {} at index {}", self.message, self.index)
    }
}

impl std::error::Error for RegExpSyntaxError {}

/// Receives one event per syntactic construct as the validator recognizes
/// it. Spans are 0-based character offsets; `*_enter`/`*_leave` pairs bracket
/// the events of nested constructs. A pattern that is re-scanned (see
/// [`RegExpValidator::validate_pattern`]) emits `on_pattern_enter` again, so
/// handlers reset their state there.
pub trait SyntaxHandler {
    fn on_flags(&mut self, _start: usize, _end: usize, _flags: FlagSet) {}
    fn on_pattern_enter(&mut self, _start: usize) {}
    fn on_pattern_leave(&mut self, _start: usize, _end: usize) {}
    fn on_alternative_enter(&mut self, _start: usize, _index: usize) {}
    fn on_alternative_leave(&mut self, _start: usize, _end: usize, _index: usize) {}
    fn on_group_enter(&mut self, _start: usize) {}
    fn on_group_leave(&mut self, _start: usize, _end: usize) {}
    fn on_capturing_group_enter(&mut self, _start: usize, _name: Option<&str>) {}
    fn on_capturing_group_leave(&mut self, _start: usize, _end: usize, _name: Option<&str>) {}
    fn on_quantifier(
        &mut self,
        _start: usize,
        _end: usize,
        _min: usize,
        _max: Option<usize>,
        _greedy: bool,
    ) {
    }
    fn on_lookaround_assertion_enter(&mut self, _start: usize, _kind: LookaroundKind, _negate: bool) {
    }
    fn on_lookaround_assertion_leave(
        &mut self,
        _start: usize,
        _end: usize,
        _kind: LookaroundKind,
        _negate: bool,
    ) {
    }
    fn on_edge_assertion(&mut self, _start: usize, _end: usize, _kind: EdgeKind) {}
    fn on_word_boundary_assertion(&mut self, _start: usize, _end: usize, _negate: bool) {}
    fn on_any_character_set(&mut self, _start: usize, _end: usize) {}
    fn on_escape_character_set(
        &mut self,
        _start: usize,
        _end: usize,
        _kind: EscapeSetKind,
        _negate: bool,
    ) {
    }
    fn on_unicode_property_character_set(
        &mut self,
        _start: usize,
        _end: usize,
        _key: &str,
        _value: Option<&str>,
        _negate: bool,
        _strings: bool,
    ) {
    }
    fn on_character(&mut self, _start: usize, _end: usize, _value: u32) {}
    fn on_backreference_index(&mut self, _start: usize, _end: usize, _index: usize) {}
    fn on_backreference_name(&mut self, _start: usize, _end: usize, _name: &str) {}
    fn on_character_class_enter(&mut self, _start: usize, _negate: bool, _unicode_sets: bool) {}
    fn on_character_class_leave(&mut self, _start: usize, _end: usize, _negate: bool) {}
    fn on_character_class_range(&mut self, _start: usize, _end: usize, _min: u32, _max: u32) {}
    fn on_class_intersection(&mut self, _start: usize, _end: usize) {}
    fn on_class_subtraction(&mut self, _start: usize, _end: usize) {}
    fn on_class_string_disjunction_enter(&mut self, _start: usize) {}
    fn on_class_string_disjunction_leave(&mut self, _start: usize, _end: usize) {}
    fn on_string_alternative_enter(&mut self, _start: usize, _index: usize) {}
    fn on_string_alternative_leave(&mut self, _start: usize, _end: usize, _index: usize) {}
}

/// Handler that discards every event; used by plain validation.
pub(crate) struct NullHandler;

impl SyntaxHandler for NullHandler {}

/// What a class atom in the legacy/`u` class grammar denoted: a single
/// character usable as a range endpoint, or a multi-character set escape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClassAtom {
    Character(u32),
    Set,
}

struct UnicodeProperty {
    key: String,
    value: Option<String>,
    strings: bool,
}

pub struct RegExpValidator<'a, H: SyntaxHandler> {
    handler: &'a mut H,
    options: ParseOptions,
    reader: Reader,
    unicode_mode: bool,
    unicode_sets_mode: bool,
    n_flag: bool,
    num_capturing_parens: usize,
    last_assertion_is_quantifiable: bool,
    group_specifiers: Box<dyn GroupSpecifiers>,
    backreference_names: FxHashSet<String>,
}

impl<'a, H: SyntaxHandler> RegExpValidator<'a, H> {
    pub fn new(handler: &'a mut H, options: ParseOptions) -> Self {
        let group_specifiers: Box<dyn GroupSpecifiers> =
            if options.ecma_version >= EcmaVersion::ES2025 {
                Box::new(ScopedGroupSpecifiers::new())
            } else {
                Box::new(FlatGroupSpecifiers::new())
            };
        RegExpValidator {
            handler,
            options,
            reader: Reader::new(""),
            unicode_mode: false,
            unicode_sets_mode: false,
            n_flag: false,
            num_capturing_parens: 0,
            last_assertion_is_quantifiable: false,
            group_specifiers,
            backreference_names: FxHashSet::default(),
        }
    }

    /// Validates a flags text and decodes it. Raises on unknown letters,
    /// duplicates, letters newer than the configured edition, and `u`
    /// together with `v`.
    pub fn validate_flags(&mut self, flags: &str) -> Result<FlagSet, RegExpSyntaxError> {
        let mut set = FlagSet::default();
        let mut count = 0;
        for (index, flag) in flags.chars().enumerate() {
            count = index + 1;
            let (seen, min_version) = match flag {
                'g' => (&mut set.global, EcmaVersion::ES5),
                'i' => (&mut set.ignore_case, EcmaVersion::ES5),
                'm' => (&mut set.multiline, EcmaVersion::ES5),
                'u' => (&mut set.unicode, EcmaVersion::ES2015),
                'y' => (&mut set.sticky, EcmaVersion::ES2015),
                's' => (&mut set.dot_all, EcmaVersion::ES2018),
                'd' => (&mut set.has_indices, EcmaVersion::ES2022),
                'v' => (&mut set.unicode_sets, EcmaVersion::ES2024),
                _ => {
                    return Err(RegExpSyntaxError::new(
                        index,
                        format!("Invalid flag '{flag}'"),
                    ));
                }
            };
            if self.options.ecma_version < min_version {
                return Err(RegExpSyntaxError::new(
                    index,
                    format!("Invalid flag '{flag}'"),
                ));
            }
            if *seen {
                return Err(RegExpSyntaxError::new(
                    index,
                    format!("Duplicated flag '{flag}'"),
                ));
            }
            *seen = true;
            if set.unicode && set.unicode_sets {
                return Err(RegExpSyntaxError::new(
                    index,
                    format!("Invalid flag '{flag}'"),
                ));
            }
        }
        self.handler.on_flags(0, count, set);
        Ok(set)
    }

    /// Validates a pattern text under the given flags, emitting handler
    /// events along the way.
    ///
    /// Without `u`/`v`, named backreference syntax only takes effect when
    /// the pattern declares at least one named group; that is only known
    /// after a full scan, so such a pattern is scanned a second time with
    /// `\k<name>` recognized.
    pub fn validate_pattern(
        &mut self,
        pattern: &str,
        flags: FlagSet,
    ) -> Result<(), RegExpSyntaxError> {
        self.reader = Reader::new(pattern);
        self.unicode_mode = flags.unicode || flags.unicode_sets;
        self.unicode_sets_mode = flags.unicode_sets;
        self.n_flag = self.options.ecma_version >= EcmaVersion::ES2018
            && (self.unicode_mode || self.options.strict);
        self.consume_pattern()?;
        if !self.n_flag
            && self.options.ecma_version >= EcmaVersion::ES2018
            && !self.group_specifiers.is_empty()
        {
            self.n_flag = true;
            self.reader.rewind(0);
            self.consume_pattern()?;
        }
        Ok(())
    }

    fn ecma_version(&self) -> EcmaVersion {
        self.options.ecma_version
    }

    /// The `u` and `v` flags imply strict (Annex-B free) syntax.
    fn strict(&self) -> bool {
        self.options.strict || self.unicode_mode
    }

    fn error(&self, message: impl Into<String>) -> RegExpSyntaxError {
        RegExpSyntaxError::new(self.reader.index(), message)
    }

    fn error_at(&self, index: usize, message: impl Into<String>) -> RegExpSyntaxError {
        RegExpSyntaxError::new(index, message)
    }

    // Pattern :: Disjunction

    fn consume_pattern(&mut self) -> Result<(), RegExpSyntaxError> {
        let start = self.reader.index();
        self.num_capturing_parens = self.count_capturing_parens();
        self.group_specifiers.clear();
        self.backreference_names.clear();

        self.handler.on_pattern_enter(start);
        self.consume_disjunction()?;

        if let Some(cp) = self.reader.current() {
            return Err(match cp {
                ')' => self.error("Unmatched ')'"),
                '\\' => self.error("\\ at end of pattern"),
                ']' | '}' => self.error("Lone quantifier brackets"),
                _ => self.error(format!("Unexpected character '{cp}'")),
            });
        }
        for name in &self.backreference_names {
            if !self.group_specifiers.has_in_pattern(name) {
                return Err(self.error("Invalid named capture referenced"));
            }
        }
        self.handler.on_pattern_leave(start, self.reader.index());
        Ok(())
    }

    /// Counts `(` that open capturing groups, ignoring class contents and
    /// escaped parentheses. The count must be known before the scan because
    /// `\1` through `\9` are backreferences only up to this count.
    fn count_capturing_parens(&mut self) -> usize {
        let start = self.reader.index();
        let mut in_class = false;
        let mut escaped = false;
        let mut count = 0;
        while let Some(cp) = self.reader.current() {
            if escaped {
                escaped = false;
            } else if cp == '\\' {
                escaped = true;
            } else if cp == '[' {
                in_class = true;
            } else if cp == ']' {
                in_class = false;
            } else if cp == '('
                && !in_class
                && (self.reader.peek() != Some('?')
                    || (self.reader.peek2() == Some('<')
                        && self.reader.peek3() != Some('=')
                        && self.reader.peek3() != Some('!')))
            {
                count += 1;
            }
            self.reader.advance();
        }
        self.reader.rewind(start);
        count
    }

    // Disjunction :: Alternative (`|` Alternative)*

    fn consume_disjunction(&mut self) -> Result<(), RegExpSyntaxError> {
        self.group_specifiers.enter_disjunction();
        let mut i = 0;
        loop {
            self.consume_alternative(i)?;
            i += 1;
            if !self.reader.eat('|') {
                break;
            }
        }
        if self.consume_quantifier(true)? {
            return Err(self.error("Nothing to repeat"));
        }
        if self.reader.eat('{') {
            return Err(self.error("Lone quantifier brackets"));
        }
        self.group_specifiers.leave_disjunction();
        Ok(())
    }

    fn consume_alternative(&mut self, index: usize) -> Result<(), RegExpSyntaxError> {
        let start = self.reader.index();
        self.group_specifiers.enter_alternative();
        self.handler.on_alternative_enter(start, index);
        while self.reader.current().is_some() && self.consume_term()? {}
        self.handler
            .on_alternative_leave(start, self.reader.index(), index);
        self.group_specifiers.leave_alternative();
        Ok(())
    }

    // Term :: Assertion | Atom Quantifier?
    // The Annex-B grammar additionally allows quantified lookaheads and the
    // extended atoms.

    fn consume_term(&mut self) -> Result<bool, RegExpSyntaxError> {
        if self.strict() {
            if self.consume_assertion()? {
                return Ok(true);
            }
            if self.consume_atom()? {
                self.consume_optional_quantifier()?;
                return Ok(true);
            }
            return Ok(false);
        }
        if self.consume_assertion()? {
            if self.last_assertion_is_quantifiable {
                self.consume_optional_quantifier()?;
            }
            return Ok(true);
        }
        if self.consume_extended_atom()? {
            self.consume_optional_quantifier()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn consume_optional_quantifier(&mut self) -> Result<(), RegExpSyntaxError> {
        self.consume_quantifier(false)?;
        Ok(())
    }

    fn consume_assertion(&mut self) -> Result<bool, RegExpSyntaxError> {
        let start = self.reader.index();
        self.last_assertion_is_quantifiable = false;

        if self.reader.eat('^') {
            self.handler
                .on_edge_assertion(start, self.reader.index(), EdgeKind::Start);
            return Ok(true);
        }
        if self.reader.eat('$') {
            self.handler
                .on_edge_assertion(start, self.reader.index(), EdgeKind::End);
            return Ok(true);
        }
        if self.reader.eat2('\\', 'B') {
            self.handler
                .on_word_boundary_assertion(start, self.reader.index(), true);
            return Ok(true);
        }
        if self.reader.eat2('\\', 'b') {
            self.handler
                .on_word_boundary_assertion(start, self.reader.index(), false);
            return Ok(true);
        }

        // lookarounds
        if self.reader.eat2('(', '?') {
            let lookbehind =
                self.ecma_version() >= EcmaVersion::ES2018 && self.reader.eat('<');
            let negate = if self.reader.eat('=') {
                Some(false)
            } else if self.reader.eat('!') {
                Some(true)
            } else {
                None
            };
            if let Some(negate) = negate {
                let kind = if lookbehind {
                    LookaroundKind::Lookbehind
                } else {
                    LookaroundKind::Lookahead
                };
                self.handler.on_lookaround_assertion_enter(start, kind, negate);
                self.consume_disjunction()?;
                if !self.reader.eat(')') {
                    return Err(self.error("Unterminated group"));
                }
                self.last_assertion_is_quantifiable = !lookbehind && !self.strict();
                self.handler
                    .on_lookaround_assertion_leave(start, self.reader.index(), kind, negate);
                return Ok(true);
            }
            self.reader.rewind(start);
        }
        Ok(false)
    }

    /// Consumes `*`, `+`, `?` or a braced quantifier plus an optional `?`.
    /// With `no_error` set, nothing is emitted and malformed braces are not
    /// raised; the disjunction end uses this to detect orphaned quantifiers.
    fn consume_quantifier(&mut self, no_error: bool) -> Result<bool, RegExpSyntaxError> {
        let start = self.reader.index();
        let (min, max) = if self.reader.eat('*') {
            (0, None)
        } else if self.reader.eat('+') {
            (1, None)
        } else if self.reader.eat('?') {
            (0, Some(1))
        } else if let Some(bounds) = self.eat_braced_quantifier(no_error)? {
            bounds
        } else {
            return Ok(false);
        };
        let greedy = !self.reader.eat('?');
        if !no_error {
            self.handler
                .on_quantifier(start, self.reader.index(), min, max, greedy);
        }
        Ok(true)
    }

    fn eat_braced_quantifier(
        &mut self,
        no_error: bool,
    ) -> Result<Option<(usize, Option<usize>)>, RegExpSyntaxError> {
        let start = self.reader.index();
        if self.reader.eat('{') {
            if let Some(min) = self.eat_decimal_digits() {
                let mut max = Some(min);
                if self.reader.eat(',') {
                    max = self.eat_decimal_digits();
                }
                if self.reader.eat('}') {
                    if !no_error && max.is_some_and(|max| max < min) {
                        return Err(
                            self.error_at(start, "numbers out of order in {} quantifier")
                        );
                    }
                    return Ok(Some((min, max)));
                }
            }
            if !no_error && self.strict() {
                return Err(self.error("Incomplete quantifier"));
            }
            self.reader.rewind(start);
        }
        Ok(None)
    }

    fn consume_atom(&mut self) -> Result<bool, RegExpSyntaxError> {
        Ok(self.consume_pattern_character()
            || self.consume_dot()
            || self.consume_reverse_solidus_atom_escape()?
            || self.consume_character_class()?.is_some()
            || self.consume_uncapturing_group()?
            || self.consume_capturing_group()?)
    }

    fn consume_extended_atom(&mut self) -> Result<bool, RegExpSyntaxError> {
        Ok(self.consume_dot()
            || self.consume_reverse_solidus_atom_escape()?
            || self.consume_reverse_solidus_followed_by_c()
            || self.consume_character_class()?.is_some()
            || self.consume_uncapturing_group()?
            || self.consume_capturing_group()?
            || self.consume_invalid_braced_quantifier()?
            || self.consume_extended_pattern_character())
    }

    /// An orphaned braced quantifier in an Annex-B pattern is an error even
    /// though a lone `{` would be a literal character.
    fn consume_invalid_braced_quantifier(&mut self) -> Result<bool, RegExpSyntaxError> {
        if self.eat_braced_quantifier(true)?.is_some() {
            return Err(self.error("Nothing to repeat"));
        }
        Ok(false)
    }

    fn consume_pattern_character(&mut self) -> bool {
        let start = self.reader.index();
        if let Some(cp) = self.reader.current() {
            if !unicode::is_syntax_character(cp) {
                self.reader.advance();
                self.handler
                    .on_character(start, self.reader.index(), cp as u32);
                return true;
            }
        }
        false
    }

    fn consume_extended_pattern_character(&mut self) -> bool {
        let start = self.reader.index();
        if let Some(cp) = self.reader.current() {
            if !matches!(
                cp,
                '^' | '$' | '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | '|'
            ) {
                self.reader.advance();
                self.handler
                    .on_character(start, self.reader.index(), cp as u32);
                return true;
            }
        }
        false
    }

    fn consume_dot(&mut self) -> bool {
        let start = self.reader.index();
        if self.reader.eat('.') {
            self.handler.on_any_character_set(start, self.reader.index());
            return true;
        }
        false
    }

    /// An Annex-B `\` directly before `c` denotes a literal backslash.
    fn consume_reverse_solidus_followed_by_c(&mut self) -> bool {
        let start = self.reader.index();
        if self.reader.current() == Some('\\') && self.reader.peek() == Some('c') {
            self.reader.advance();
            self.handler
                .on_character(start, self.reader.index(), '\\' as u32);
            return true;
        }
        false
    }

    fn consume_reverse_solidus_atom_escape(&mut self) -> Result<bool, RegExpSyntaxError> {
        let start = self.reader.index();
        if self.reader.eat('\\') {
            if self.consume_atom_escape()? {
                return Ok(true);
            }
            self.reader.rewind(start);
        }
        Ok(false)
    }

    fn consume_atom_escape(&mut self) -> Result<bool, RegExpSyntaxError> {
        if self.consume_backreference()?
            || self.consume_character_class_escape()?.is_some()
            || self.consume_character_escape_into_event()?
            || (self.n_flag && self.consume_k_group_name()?)
        {
            return Ok(true);
        }
        if self.strict() {
            return Err(self.error("Invalid escape"));
        }
        Ok(false)
    }

    fn consume_backreference(&mut self) -> Result<bool, RegExpSyntaxError> {
        let start = self.reader.index();
        if let Some(n) = self.eat_decimal_escape() {
            if n <= self.num_capturing_parens {
                self.handler
                    .on_backreference_index(start - 1, self.reader.index(), n);
                return Ok(true);
            }
            if self.strict() {
                return Err(self.error("Invalid escape"));
            }
            self.reader.rewind(start);
        }
        Ok(false)
    }

    fn consume_k_group_name(&mut self) -> Result<bool, RegExpSyntaxError> {
        let start = self.reader.index();
        if self.reader.eat('k') {
            if let Some(name) = self.eat_group_name()? {
                self.backreference_names.insert(name.clone());
                self.handler
                    .on_backreference_name(start - 1, self.reader.index(), &name);
                return Ok(true);
            }
            return Err(self.error("Invalid named reference"));
        }
        Ok(false)
    }

    /// `\d`-family and `\p{...}` escapes. Returns whether the consumed set
    /// may contain strings (only possible for `\p` in `v` mode).
    fn consume_character_class_escape(&mut self) -> Result<Option<bool>, RegExpSyntaxError> {
        let start = self.reader.index();

        let escape = if self.reader.eat('d') {
            Some((EscapeSetKind::Digit, false))
        } else if self.reader.eat('D') {
            Some((EscapeSetKind::Digit, true))
        } else if self.reader.eat('s') {
            Some((EscapeSetKind::Space, false))
        } else if self.reader.eat('S') {
            Some((EscapeSetKind::Space, true))
        } else if self.reader.eat('w') {
            Some((EscapeSetKind::Word, false))
        } else if self.reader.eat('W') {
            Some((EscapeSetKind::Word, true))
        } else {
            None
        };
        if let Some((kind, negate)) = escape {
            self.handler
                .on_escape_character_set(start - 1, self.reader.index(), kind, negate);
            return Ok(Some(false));
        }

        if self.unicode_mode && self.ecma_version() >= EcmaVersion::ES2018 {
            let negate = if self.reader.eat('p') {
                Some(false)
            } else if self.reader.eat('P') {
                Some(true)
            } else {
                None
            };
            if let Some(negate) = negate {
                if self.reader.eat('{') {
                    if let Some(property) = self.eat_unicode_property_value_expression()? {
                        if self.reader.eat('}') {
                            if negate && property.strings {
                                return Err(self.error("Invalid property name"));
                            }
                            self.handler.on_unicode_property_character_set(
                                start - 1,
                                self.reader.index(),
                                &property.key,
                                property.value.as_deref(),
                                negate,
                                property.strings,
                            );
                            return Ok(Some(property.strings));
                        }
                    }
                }
                return Err(self.error("Invalid property name"));
            }
        }
        Ok(None)
    }

    fn consume_character_escape_into_event(&mut self) -> Result<bool, RegExpSyntaxError> {
        let start = self.reader.index();
        if let Some(value) = self.consume_character_escape()? {
            self.handler
                .on_character(start - 1, self.reader.index(), value);
            return Ok(true);
        }
        Ok(false)
    }

    /// CharacterEscape: the escapes denoting a single code point. Emits
    /// nothing; each call site reports the value with its own span.
    fn consume_character_escape(&mut self) -> Result<Option<u32>, RegExpSyntaxError> {
        if let Some(value) = self.eat_control_escape() {
            return Ok(Some(value));
        }
        if let Some(value) = self.eat_c_control_letter() {
            return Ok(Some(value));
        }
        if let Some(value) = self.eat_zero() {
            return Ok(Some(value));
        }
        if let Some(value) = self.eat_hex_escape_sequence()? {
            return Ok(Some(value));
        }
        if let Some(value) = self.eat_regexp_unicode_escape_sequence(false)? {
            return Ok(Some(value));
        }
        if !self.strict() {
            if let Some(value) = self.eat_legacy_octal_escape_sequence() {
                return Ok(Some(value));
            }
        }
        Ok(self.eat_identity_escape())
    }

    // Groups

    fn consume_uncapturing_group(&mut self) -> Result<bool, RegExpSyntaxError> {
        let start = self.reader.index();
        if self.reader.eat3('(', '?', ':') {
            self.handler.on_group_enter(start);
            self.consume_disjunction()?;
            if !self.reader.eat(')') {
                return Err(self.error("Unterminated group"));
            }
            self.handler.on_group_leave(start, self.reader.index());
            return Ok(true);
        }
        Ok(false)
    }

    fn consume_capturing_group(&mut self) -> Result<bool, RegExpSyntaxError> {
        let start = self.reader.index();
        if self.reader.eat('(') {
            let mut name = None;
            if self.ecma_version() >= EcmaVersion::ES2018 {
                name = self.consume_group_specifier()?;
                if name.is_none() && self.reader.current() == Some('?') {
                    return Err(self.error("Invalid group"));
                }
            } else if self.reader.current() == Some('?') {
                return Err(self.error("Invalid group"));
            }

            self.handler.on_capturing_group_enter(start, name.as_deref());
            self.consume_disjunction()?;
            if !self.reader.eat(')') {
                return Err(self.error("Unterminated group"));
            }
            self.handler
                .on_capturing_group_leave(start, self.reader.index(), name.as_deref());
            return Ok(true);
        }
        Ok(false)
    }

    fn consume_group_specifier(&mut self) -> Result<Option<String>, RegExpSyntaxError> {
        let start = self.reader.index();
        if self.reader.eat('?') {
            if let Some(name) = self.eat_group_name()? {
                if !self.group_specifiers.has_in_scope(&name) {
                    self.group_specifiers.add_to_scope(&name);
                    return Ok(Some(name));
                }
                return Err(self.error("Duplicate capture group name"));
            }
            self.reader.rewind(start);
        }
        Ok(None)
    }

    // Character classes (legacy and `u` grammar)

    /// Returns whether the class may contain strings when one was consumed.
    fn consume_character_class(&mut self) -> Result<Option<bool>, RegExpSyntaxError> {
        let start = self.reader.index();
        if self.reader.eat('[') {
            let negate = self.reader.eat('^');
            self.handler
                .on_character_class_enter(start, negate, self.unicode_sets_mode);
            let may_contain_strings = self.consume_class_contents()?;
            if !self.reader.eat(']') {
                return Err(self.class_close_error());
            }
            if negate && may_contain_strings {
                return Err(self.error("Negated character class may contain strings"));
            }
            self.handler
                .on_character_class_leave(start, self.reader.index(), negate);
            return Ok(Some(may_contain_strings));
        }
        Ok(None)
    }

    /// Error for a class body that stopped before `]`.
    fn class_close_error(&self) -> RegExpSyntaxError {
        let Some(cp) = self.reader.current() else {
            return self.error("Unterminated character class");
        };
        if self.unicode_sets_mode
            && Some(cp) == self.reader.peek()
            && unicode::is_class_set_reserved_double_punctuator_character(cp)
        {
            return self.error("Invalid set operation in character class");
        }
        self.error("Invalid character in character class")
    }

    fn consume_class_contents(&mut self) -> Result<bool, RegExpSyntaxError> {
        if self.unicode_sets_mode {
            if self.reader.current() == Some(']') {
                // empty class
                return Ok(false);
            }
            return self.consume_class_set_expression();
        }

        loop {
            let range_start = self.reader.index();
            let Some(min) = self.consume_class_atom()? else {
                break;
            };
            if !self.reader.eat('-') {
                continue;
            }
            self.handler
                .on_character(self.reader.index() - 1, self.reader.index(), '-' as u32);
            let Some(max) = self.consume_class_atom()? else {
                break;
            };
            let (ClassAtom::Character(min), ClassAtom::Character(max)) = (min, max) else {
                // a set escape cannot bound a range
                if self.strict() {
                    return Err(self.error("Invalid character class"));
                }
                continue;
            };
            if min > max {
                return Err(self.error("Range out of order in character class"));
            }
            self.handler
                .on_character_class_range(range_start, self.reader.index(), min, max);
        }
        Ok(false)
    }

    fn consume_class_atom(&mut self) -> Result<Option<ClassAtom>, RegExpSyntaxError> {
        let start = self.reader.index();
        if let Some(cp) = self.reader.current() {
            if cp != '\\' && cp != ']' {
                self.reader.advance();
                self.handler
                    .on_character(start, self.reader.index(), cp as u32);
                return Ok(Some(ClassAtom::Character(cp as u32)));
            }
        }
        if self.reader.current() == Some('\\') {
            self.reader.advance();
            if let Some(atom) = self.consume_class_escape()? {
                return Ok(Some(atom));
            }
            if !self.strict() && self.reader.current() == Some('c') {
                // Annex B: `\c` with no control letter is a literal backslash
                self.handler
                    .on_character(start, self.reader.index(), '\\' as u32);
                return Ok(Some(ClassAtom::Character('\\' as u32)));
            }
            if self.strict() {
                return Err(self.error("Invalid escape"));
            }
            self.reader.rewind(start);
        }
        Ok(None)
    }

    fn consume_class_escape(&mut self) -> Result<Option<ClassAtom>, RegExpSyntaxError> {
        let start = self.reader.index();
        if self.reader.eat('b') {
            // backspace, not a word boundary, inside a class
            self.handler.on_character(start - 1, self.reader.index(), 0x08);
            return Ok(Some(ClassAtom::Character(0x08)));
        }
        if self.unicode_mode && self.reader.eat('-') {
            self.handler
                .on_character(start - 1, self.reader.index(), '-' as u32);
            return Ok(Some(ClassAtom::Character('-' as u32)));
        }
        if !self.strict() && self.reader.current() == Some('c') {
            if let Some(next) = self.reader.peek() {
                if next.is_ascii_digit() || next == '_' {
                    // Annex B ClassControlLetter
                    self.reader.advance();
                    self.reader.advance();
                    let value = (next as u32) % 0x20;
                    self.handler
                        .on_character(start - 1, self.reader.index(), value);
                    return Ok(Some(ClassAtom::Character(value)));
                }
            }
        }
        if self.consume_character_class_escape()?.is_some() {
            return Ok(Some(ClassAtom::Set));
        }
        if let Some(value) = self.consume_character_escape()? {
            self.handler
                .on_character(start - 1, self.reader.index(), value);
            return Ok(Some(ClassAtom::Character(value)));
        }
        Ok(None)
    }

    // `v`-mode class set expressions

    fn consume_class_set_expression(&mut self) -> Result<bool, RegExpSyntaxError> {
        let start = self.reader.index();
        let mut may_contain_strings = false;

        if let Some(min) = self.consume_class_set_character()? {
            if self.consume_class_set_range_from_operator(start, min)? {
                return self.consume_class_union_right(false);
            }
        } else if let Some(strings) = self.consume_class_set_operand()? {
            may_contain_strings = strings;
        } else {
            if self.reader.current() == Some('\\') {
                self.reader.advance();
                return Err(self.error("Invalid escape"));
            }
            if let Some(cp) = self.reader.current() {
                if Some(cp) == self.reader.peek()
                    && unicode::is_class_set_reserved_double_punctuator_character(cp)
                {
                    return Err(self.error("Invalid set operation in character class"));
                }
            }
            return Err(self.error("Invalid character in character class"));
        }

        if self.reader.eat2('&', '&') {
            // intersection chain; strings survive only if every operand has them
            loop {
                if self.reader.current() == Some('&') {
                    break;
                }
                let Some(strings) = self.consume_class_set_operand()? else {
                    break;
                };
                self.handler
                    .on_class_intersection(start, self.reader.index());
                if !strings {
                    may_contain_strings = false;
                }
                if !self.reader.eat2('&', '&') {
                    return Ok(may_contain_strings);
                }
            }
            return Err(self.error("Invalid character in character class"));
        }
        if self.reader.eat2('-', '-') {
            // subtraction chain; only the leftmost operand decides strings
            loop {
                if self.consume_class_set_operand()?.is_none() {
                    break;
                }
                self.handler
                    .on_class_subtraction(start, self.reader.index());
                if !self.reader.eat2('-', '-') {
                    return Ok(may_contain_strings);
                }
            }
            return Err(self.error("Invalid character in character class"));
        }

        self.consume_class_union_right(may_contain_strings)
    }

    fn consume_class_union_right(
        &mut self,
        left_may_contain_strings: bool,
    ) -> Result<bool, RegExpSyntaxError> {
        let mut may_contain_strings = left_may_contain_strings;
        loop {
            let start = self.reader.index();
            if let Some(min) = self.consume_class_set_character()? {
                self.consume_class_set_range_from_operator(start, min)?;
                continue;
            }
            if let Some(strings) = self.consume_class_set_operand()? {
                if strings {
                    may_contain_strings = true;
                }
                continue;
            }
            break;
        }
        Ok(may_contain_strings)
    }

    fn consume_class_set_range_from_operator(
        &mut self,
        start: usize,
        min: u32,
    ) -> Result<bool, RegExpSyntaxError> {
        let operator_start = self.reader.index();
        if self.reader.eat('-') {
            if let Some(max) = self.consume_class_set_character()? {
                if min > max {
                    return Err(self.error("Range out of order in character class"));
                }
                self.handler
                    .on_character_class_range(start, self.reader.index(), min, max);
                return Ok(true);
            }
            self.reader.rewind(operator_start);
        }
        Ok(false)
    }

    fn consume_class_set_operand(&mut self) -> Result<Option<bool>, RegExpSyntaxError> {
        if let Some(strings) = self.consume_nested_class()? {
            return Ok(Some(strings));
        }
        if let Some(strings) = self.consume_class_string_disjunction()? {
            return Ok(Some(strings));
        }
        if self.consume_class_set_character()?.is_some() {
            return Ok(Some(false));
        }
        Ok(None)
    }

    fn consume_nested_class(&mut self) -> Result<Option<bool>, RegExpSyntaxError> {
        let start = self.reader.index();
        if self.reader.eat('[') {
            let negate = self.reader.eat('^');
            self.handler.on_character_class_enter(start, negate, true);
            let strings = self.consume_class_contents()?;
            if !self.reader.eat(']') {
                return Err(self.class_close_error());
            }
            if negate && strings {
                return Err(self.error("Negated character class may contain strings"));
            }
            self.handler
                .on_character_class_leave(start, self.reader.index(), negate);
            return Ok(Some(strings));
        }
        if self.reader.eat('\\') {
            if let Some(strings) = self.consume_character_class_escape()? {
                return Ok(Some(strings));
            }
            self.reader.rewind(start);
        }
        Ok(None)
    }

    fn consume_class_string_disjunction(&mut self) -> Result<Option<bool>, RegExpSyntaxError> {
        let start = self.reader.index();
        if self.reader.eat3('\\', 'q', '{') {
            self.handler.on_class_string_disjunction_enter(start);
            let mut i = 0;
            let mut may_contain_strings = false;
            loop {
                if self.consume_class_string(i)? {
                    may_contain_strings = true;
                }
                i += 1;
                if !self.reader.eat('|') {
                    break;
                }
            }
            if self.reader.eat('}') {
                self.handler
                    .on_class_string_disjunction_leave(start, self.reader.index());
                return Ok(Some(may_contain_strings));
            }
            return Err(self.error("Unterminated class string disjunction"));
        }
        Ok(None)
    }

    /// Returns whether the alternative is a string proper, i.e. not exactly
    /// one character long.
    fn consume_class_string(&mut self, index: usize) -> Result<bool, RegExpSyntaxError> {
        let start = self.reader.index();
        let mut count = 0usize;
        self.handler.on_string_alternative_enter(start, index);
        while self.reader.current().is_some() && self.consume_class_set_character()?.is_some() {
            count += 1;
        }
        self.handler
            .on_string_alternative_leave(start, self.reader.index(), index);
        Ok(count != 1)
    }

    fn consume_class_set_character(&mut self) -> Result<Option<u32>, RegExpSyntaxError> {
        let start = self.reader.index();
        let cp = self.reader.current();
        if let Some(c) = cp {
            if !(Some(c) == self.reader.peek()
                && unicode::is_class_set_reserved_double_punctuator_character(c))
                && !unicode::is_class_set_syntax_character(c)
            {
                self.reader.advance();
                self.handler
                    .on_character(start, self.reader.index(), c as u32);
                return Ok(Some(c as u32));
            }
        }
        if cp == Some('\\') {
            self.reader.advance();
            if let Some(value) = self.consume_character_escape()? {
                self.handler
                    .on_character(start, self.reader.index(), value);
                return Ok(Some(value));
            }
            if let Some(c) = self.reader.current() {
                if unicode::is_class_set_reserved_punctuator(c) {
                    self.reader.advance();
                    self.handler
                        .on_character(start, self.reader.index(), c as u32);
                    return Ok(Some(c as u32));
                }
            }
            if self.reader.eat('b') {
                self.handler.on_character(start, self.reader.index(), 0x08);
                return Ok(Some(0x08));
            }
            self.reader.rewind(start);
        }
        Ok(None)
    }

    // Group names

    fn eat_group_name(&mut self) -> Result<Option<String>, RegExpSyntaxError> {
        if self.reader.eat('<') {
            if let Some(name) = self.eat_regexp_identifier_name()? {
                if self.reader.eat('>') {
                    return Ok(Some(name));
                }
            }
            return Err(self.error("Invalid capture group name"));
        }
        Ok(None)
    }

    fn eat_regexp_identifier_name(&mut self) -> Result<Option<String>, RegExpSyntaxError> {
        if let Some(first) = self.eat_regexp_identifier_start()? {
            let mut name = String::from(first);
            while let Some(part) = self.eat_regexp_identifier_part()? {
                name.push(part);
            }
            return Ok(Some(name));
        }
        Ok(None)
    }

    fn eat_regexp_identifier_start(&mut self) -> Result<Option<char>, RegExpSyntaxError> {
        let start = self.reader.index();
        let force_u = !self.unicode_mode && self.ecma_version() >= EcmaVersion::ES2020;
        let Some(cp) = self.reader.current() else {
            return Ok(None);
        };
        self.reader.advance();
        let value = if cp == '\\' {
            match self.eat_regexp_unicode_escape_sequence(force_u)? {
                Some(value) => value,
                None => {
                    self.reader.rewind(start);
                    return Ok(None);
                }
            }
        } else {
            cp as u32
        };
        match char::from_u32(value) {
            Some(c) if unicode::is_identifier_start_char(c) => Ok(Some(c)),
            _ => {
                self.reader.rewind(start);
                Ok(None)
            }
        }
    }

    fn eat_regexp_identifier_part(&mut self) -> Result<Option<char>, RegExpSyntaxError> {
        let start = self.reader.index();
        let force_u = !self.unicode_mode && self.ecma_version() >= EcmaVersion::ES2020;
        let Some(cp) = self.reader.current() else {
            return Ok(None);
        };
        self.reader.advance();
        let value = if cp == '\\' {
            match self.eat_regexp_unicode_escape_sequence(force_u)? {
                Some(value) => value,
                None => {
                    self.reader.rewind(start);
                    return Ok(None);
                }
            }
        } else {
            cp as u32
        };
        match char::from_u32(value) {
            Some(c) if unicode::is_identifier_part_char(c) => Ok(Some(c)),
            _ => {
                self.reader.rewind(start);
                Ok(None)
            }
        }
    }

    // Escape sequence scanners

    fn eat_control_escape(&mut self) -> Option<u32> {
        let value = match self.reader.current()? {
            'f' => 0x0C,
            'n' => 0x0A,
            'r' => 0x0D,
            't' => 0x09,
            'v' => 0x0B,
            _ => return None,
        };
        self.reader.advance();
        Some(value)
    }

    fn eat_c_control_letter(&mut self) -> Option<u32> {
        let start = self.reader.index();
        if self.reader.eat('c') {
            if let Some(value) = self.eat_control_letter() {
                return Some(value);
            }
            self.reader.rewind(start);
        }
        None
    }

    fn eat_control_letter(&mut self) -> Option<u32> {
        if let Some(c) = self.reader.current() {
            if c.is_ascii_alphabetic() {
                self.reader.advance();
                return Some((c as u32) % 0x20);
            }
        }
        None
    }

    /// `\0` not followed by a digit.
    fn eat_zero(&mut self) -> Option<u32> {
        if self.reader.current() == Some('0')
            && !self.reader.peek().is_some_and(|c| c.is_ascii_digit())
        {
            self.reader.advance();
            return Some(0);
        }
        None
    }

    fn eat_hex_escape_sequence(&mut self) -> Result<Option<u32>, RegExpSyntaxError> {
        let start = self.reader.index();
        if self.reader.eat('x') {
            if let Some(value) = self.eat_fixed_hex_digits(2) {
                return Ok(Some(value));
            }
            if self.strict() {
                return Err(self.error("Invalid escape"));
            }
            self.reader.rewind(start);
        }
        Ok(None)
    }

    /// `\uHHHH`, a surrogate pair of those, or `\u{...}`. `force_u` enables
    /// the Unicode-mode forms for group names in non-Unicode patterns.
    fn eat_regexp_unicode_escape_sequence(
        &mut self,
        force_u: bool,
    ) -> Result<Option<u32>, RegExpSyntaxError> {
        let start = self.reader.index();
        let u_mode = force_u || self.unicode_mode;
        if self.reader.eat('u') {
            if u_mode {
                if let Some(value) = self.eat_regexp_unicode_surrogate_pair_escape() {
                    return Ok(Some(value));
                }
            }
            if let Some(value) = self.eat_fixed_hex_digits(4) {
                return Ok(Some(value));
            }
            if u_mode {
                if let Some(value) = self.eat_regexp_unicode_code_point_escape() {
                    return Ok(Some(value));
                }
            }
            if self.options.strict || u_mode {
                return Err(self.error("Invalid unicode escape"));
            }
            self.reader.rewind(start);
        }
        Ok(None)
    }

    fn eat_regexp_unicode_surrogate_pair_escape(&mut self) -> Option<u32> {
        let start = self.reader.index();
        if let Some(lead) = self.eat_fixed_hex_digits(4) {
            if unicode::is_lead_surrogate(lead)
                && self.reader.eat('\\')
                && self.reader.eat('u')
            {
                if let Some(trail) = self.eat_fixed_hex_digits(4) {
                    if unicode::is_trail_surrogate(trail) {
                        return Some(unicode::combine_surrogate_pair(lead, trail));
                    }
                }
            }
            self.reader.rewind(start);
        }
        None
    }

    fn eat_regexp_unicode_code_point_escape(&mut self) -> Option<u32> {
        let start = self.reader.index();
        if self.reader.eat('{') {
            if let Some(value) = self.eat_hex_digits() {
                if self.reader.eat('}') && value <= 0x10FFFF {
                    return Some(value);
                }
            }
            self.reader.rewind(start);
        }
        None
    }

    fn eat_identity_escape(&mut self) -> Option<u32> {
        let cp = self.reader.current()?;
        if self.is_valid_identity_escape(cp) {
            self.reader.advance();
            return Some(cp as u32);
        }
        None
    }

    fn is_valid_identity_escape(&self, cp: char) -> bool {
        if self.unicode_mode {
            unicode::is_syntax_character(cp) || cp == '/'
        } else if self.options.strict {
            !unicode::is_id_continue(cp)
        } else if self.n_flag {
            !(cp == 'c' || cp == 'k')
        } else {
            cp != 'c'
        }
    }

    /// `\1`..`\9` followed by more digits; the caller decides whether the
    /// value is a backreference.
    fn eat_decimal_escape(&mut self) -> Option<usize> {
        let first = self.reader.current()?;
        if !first.is_ascii_digit() || first == '0' {
            return None;
        }
        let mut value = 0usize;
        while let Some(d) = self.reader.current().and_then(|c| c.to_digit(10)) {
            value = value.saturating_mul(10).saturating_add(d as usize);
            self.reader.advance();
        }
        Some(value)
    }

    fn eat_octal_digit(&mut self) -> Option<u32> {
        if let Some(d) = self.reader.current().and_then(|c| c.to_digit(8)) {
            self.reader.advance();
            return Some(d);
        }
        None
    }

    fn eat_legacy_octal_escape_sequence(&mut self) -> Option<u32> {
        if let Some(d1) = self.eat_octal_digit() {
            if let Some(d2) = self.eat_octal_digit() {
                if d1 <= 3 {
                    if let Some(d3) = self.eat_octal_digit() {
                        return Some(d1 * 64 + d2 * 8 + d3);
                    }
                }
                return Some(d1 * 8 + d2);
            }
            return Some(d1);
        }
        None
    }

    fn eat_decimal_digits(&mut self) -> Option<usize> {
        let mut value = 0usize;
        let mut any = false;
        while let Some(d) = self.reader.current().and_then(|c| c.to_digit(10)) {
            value = value.saturating_mul(10).saturating_add(d as usize);
            self.reader.advance();
            any = true;
        }
        any.then_some(value)
    }

    fn eat_hex_digits(&mut self) -> Option<u32> {
        let mut value = 0u32;
        let mut any = false;
        while let Some(d) = self.reader.current().and_then(|c| c.to_digit(16)) {
            value = value.saturating_mul(16).saturating_add(d);
            self.reader.advance();
            any = true;
        }
        any.then_some(value)
    }

    fn eat_fixed_hex_digits(&mut self, length: usize) -> Option<u32> {
        let start = self.reader.index();
        let mut value = 0u32;
        for _ in 0..length {
            let Some(d) = self.reader.current().and_then(|c| c.to_digit(16)) else {
                self.reader.rewind(start);
                return None;
            };
            value = value * 16 + d;
            self.reader.advance();
        }
        Some(value)
    }

    // Unicode property expressions

    fn eat_unicode_property_value_expression(
        &mut self,
    ) -> Result<Option<UnicodeProperty>, RegExpSyntaxError> {
        let start = self.reader.index();

        // PropertyName "=" PropertyValue
        if let Some(key) = self.eat_unicode_property_name() {
            if self.reader.eat('=') {
                if let Some(value) = self.eat_unicode_property_value() {
                    if properties::is_valid_unicode_property(self.ecma_version(), &key, &value) {
                        return Ok(Some(UnicodeProperty {
                            key,
                            value: Some(value),
                            strings: false,
                        }));
                    }
                    return Err(self.error("Invalid property name"));
                }
            }
        }
        self.reader.rewind(start);

        // LoneUnicodePropertyNameOrValue
        if let Some(name) = self.eat_lone_unicode_property_name_or_value() {
            if properties::is_valid_unicode_property(
                self.ecma_version(),
                "General_Category",
                &name,
            ) {
                return Ok(Some(UnicodeProperty {
                    key: "General_Category".to_string(),
                    value: Some(name),
                    strings: false,
                }));
            }
            if properties::is_valid_lone_unicode_property(self.ecma_version(), &name) {
                return Ok(Some(UnicodeProperty {
                    key: name,
                    value: None,
                    strings: false,
                }));
            }
            if self.unicode_sets_mode
                && properties::is_valid_lone_unicode_property_of_strings(
                    self.ecma_version(),
                    &name,
                )
            {
                return Ok(Some(UnicodeProperty {
                    key: name,
                    value: None,
                    strings: true,
                }));
            }
            return Err(self.error("Invalid property name"));
        }
        Ok(None)
    }

    fn eat_unicode_property_name(&mut self) -> Option<String> {
        let mut name = String::new();
        while let Some(c) = self.reader.current() {
            if !unicode::is_unicode_property_name_character(c) {
                break;
            }
            name.push(c);
            self.reader.advance();
        }
        (!name.is_empty()).then_some(name)
    }

    fn eat_unicode_property_value(&mut self) -> Option<String> {
        let mut value = String::new();
        while let Some(c) = self.reader.current() {
            if !unicode::is_unicode_property_value_character(c) {
                break;
            }
            value.push(c);
            self.reader.advance();
        }
        (!value.is_empty()).then_some(value)
    }

    fn eat_lone_unicode_property_name_or_value(&mut self) -> Option<String> {
        self.eat_unicode_property_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_with(
        pattern: &str,
        flags: &str,
        options: ParseOptions,
    ) -> Result<(), RegExpSyntaxError> {
        let mut handler = NullHandler;
        let mut validator = RegExpValidator::new(&mut handler, options);
        let flag_set = validator.validate_flags(flags)?;
        validator.validate_pattern(pattern, flag_set)
    }

    fn validate(pattern: &str, flags: &str) -> Result<(), RegExpSyntaxError> {
        validate_with(pattern, flags, ParseOptions::default())
    }

    fn validate_at(pattern: &str, flags: &str, version: EcmaVersion) -> Result<(), RegExpSyntaxError> {
        validate_with(
            pattern,
            flags,
            ParseOptions {
                strict: false,
                ecma_version: version,
            },
        )
    }

    fn err(pattern: &str, flags: &str) -> RegExpSyntaxError {
        validate(pattern, flags).unwrap_err()
    }

    #[test]
    fn accepts_basic_patterns() {
        for p in ["", "a", "a|b", "a*b+c?", "(a)(?:b)", "[a-z]+", "^a$", "a{2,3}"] {
            assert!(validate(p, "").is_ok(), "{p}");
            assert!(validate(p, "u").is_ok(), "{p} /u");
            assert!(validate(p, "v").is_ok(), "{p} /v");
        }
    }

    #[test]
    fn flags_decode() {
        let mut handler = NullHandler;
        let mut validator = RegExpValidator::new(&mut handler, ParseOptions::default());
        let set = validator.validate_flags("gimsuy").unwrap();
        assert!(set.global && set.ignore_case && set.multiline);
        assert!(set.dot_all && set.unicode && set.sticky);
        assert!(!set.has_indices && !set.unicode_sets);
    }

    #[test]
    fn flags_reject_duplicates_and_unknowns() {
        let e = validate("", "gg").unwrap_err();
        assert_eq!(e.message, "Duplicated flag 'g'");
        assert_eq!(e.index, 1);
        let e = validate("", "z").unwrap_err();
        assert_eq!(e.message, "Invalid flag 'z'");
    }

    #[test]
    fn flags_reject_u_with_v() {
        let e = validate("", "uv").unwrap_err();
        assert_eq!(e.message, "Invalid flag 'v'");
        assert_eq!(e.index, 1);
        let e = validate("", "vu").unwrap_err();
        assert_eq!(e.message, "Invalid flag 'u'");
    }

    #[test]
    fn flags_are_edition_gated() {
        assert!(validate_at("", "u", EcmaVersion::ES5).is_err());
        assert!(validate_at("", "u", EcmaVersion::ES2015).is_ok());
        assert!(validate_at("", "s", EcmaVersion::ES2017).is_err());
        assert!(validate_at("", "s", EcmaVersion::ES2018).is_ok());
        assert!(validate_at("", "d", EcmaVersion::ES2021).is_err());
        assert!(validate_at("", "d", EcmaVersion::ES2022).is_ok());
        assert!(validate_at("", "v", EcmaVersion::ES2023).is_err());
        assert!(validate_at("", "v", EcmaVersion::ES2024).is_ok());
    }

    #[test]
    fn quantifier_bounds_out_of_order() {
        let e = err("a{2,1}", "");
        assert_eq!(e.message, "numbers out of order in {} quantifier");
        assert_eq!(e.index, 1); // at the opening brace
        assert!(validate("a{1,2}", "").is_ok());
        assert!(validate("a{2,}", "").is_ok());
        assert!(validate("a{2}", "").is_ok());
    }

    #[test]
    fn orphaned_quantifiers() {
        assert_eq!(err("*", "").message, "Nothing to repeat");
        assert_eq!(err("a**", "").message, "Nothing to repeat");
        assert_eq!(err("a{2,1}", "u").message, "numbers out of order in {} quantifier");
    }

    #[test]
    fn incomplete_braced_quantifier_is_annex_b_only() {
        // a literal `{` is fine without the u flag
        assert!(validate("a{", "").is_ok());
        assert!(validate("{a}", "").is_ok());
        let e = err("a{", "u");
        assert_eq!(e.message, "Incomplete quantifier");
        assert_eq!(err("{", "u").message, "Lone quantifier brackets");
        assert_eq!(err("a}", "u").message, "Lone quantifier brackets");
    }

    #[test]
    fn unterminated_constructs() {
        assert_eq!(err("(a", "").message, "Unterminated group");
        assert_eq!(err(")", "").message, "Unmatched ')'");
        assert_eq!(err("[a", "").message, "Unterminated character class");
        assert_eq!(err("\\", "").message, "\\ at end of pattern");
    }

    #[test]
    fn quantified_lookahead_is_annex_b_only() {
        assert!(validate("(?=a)*", "").is_ok());
        assert_eq!(err("(?=a)*", "u").message, "Nothing to repeat");
        // lookbehind is never quantifiable
        assert_eq!(err("(?<=a)*", "").message, "Nothing to repeat");
    }

    #[test]
    fn lookbehind_is_edition_gated() {
        assert!(validate("(?<=a)b", "").is_ok());
        assert!(validate("(?<!a)b", "u").is_ok());
        assert_eq!(
            validate_at("(?<=a)b", "", EcmaVersion::ES2017)
                .unwrap_err()
                .message,
            "Invalid group"
        );
    }

    #[test]
    fn named_groups_are_edition_gated() {
        assert!(validate("(?<name>a)", "").is_ok());
        assert_eq!(
            validate_at("(?<name>a)", "", EcmaVersion::ES2017)
                .unwrap_err()
                .message,
            "Invalid group"
        );
    }

    #[test]
    fn invalid_group_names() {
        assert_eq!(err("(?<1a>x)", "").message, "Invalid capture group name");
        assert_eq!(err("(?<a", "").message, "Invalid capture group name");
        assert!(validate("(?<$a_1>x)", "u").is_ok());
        assert!(validate("(?<\\u0061>x)", "u").is_ok());
    }

    #[test]
    fn duplicate_group_names_same_alternative() {
        let e = err("(?<a>x)(?<a>y)", "");
        assert_eq!(e.message, "Duplicate capture group name");
        assert_eq!(err("(?<a>x)|(?<a>y)(?<a>z)", "").message, "Duplicate capture group name");
    }

    #[test]
    fn duplicate_group_names_across_alternatives_es2025() {
        assert!(validate("(?<a>x)|(?<a>y)", "").is_ok());
        assert!(validate("((?<a>x)|(?<a>y))|(?<a>z)", "u").is_ok());
        assert_eq!(
            err("((?<a>x)|(?<a>y))(?<a>z)", "").message,
            "Duplicate capture group name"
        );
    }

    #[test]
    fn duplicate_group_names_rejected_before_es2025() {
        assert_eq!(
            validate_at("(?<a>x)|(?<a>y)", "", EcmaVersion::ES2024)
                .unwrap_err()
                .message,
            "Duplicate capture group name"
        );
    }

    #[test]
    fn numbered_backreferences() {
        // forward references are legal
        assert!(validate("\\1(a)", "u").is_ok());
        assert!(validate("(a)\\1", "").is_ok());
        // out of range: error with u, octal escape without
        assert_eq!(err("\\2(a)", "u").message, "Invalid escape");
        assert!(validate("\\2(a)", "").is_ok());
    }

    #[test]
    fn named_backreferences() {
        assert!(validate("(?<a>x)\\k<a>", "u").is_ok());
        assert!(validate("\\k<a>(?<a>x)", "").is_ok());
        let e = err("(?<a>x)\\k<b>", "u");
        assert_eq!(e.message, "Invalid named capture referenced");
        assert_eq!(e.index, 12); // reported at the end of the pattern
    }

    #[test]
    fn k_escape_without_named_groups_is_annex_b_literal() {
        assert!(validate("\\k<a>", "").is_ok());
        assert_eq!(err("\\k<a>", "u").message, "Invalid named capture referenced");
    }

    #[test]
    fn class_ranges() {
        assert!(validate("[a-z]", "").is_ok());
        assert_eq!(
            err("[b-a]", "").message,
            "Range out of order in character class"
        );
        assert_eq!(
            err("[z-a]", "v").message,
            "Range out of order in character class"
        );
        // a set escape bounding a range is Annex-B tolerated, u-mode fatal
        assert!(validate("[\\d-z]", "").is_ok());
        assert_eq!(err("[\\d-z]", "u").message, "Invalid character class");
    }

    #[test]
    fn class_escapes() {
        assert!(validate("[\\b]", "u").is_ok()); // backspace
        assert!(validate("[\\-]", "u").is_ok());
        assert!(validate("[a\\]b]", "u").is_ok());
        assert!(validate("[\\c5]", "").is_ok()); // Annex B ClassControlLetter
        assert_eq!(err("[\\c5]", "u").message, "Invalid escape");
    }

    #[test]
    fn character_escapes() {
        assert!(validate("\\n\\t\\r\\f\\v", "u").is_ok());
        assert!(validate("\\x41", "u").is_ok());
        assert!(validate("\\u0041", "u").is_ok());
        assert!(validate("\\u{1F600}", "u").is_ok());
        assert!(validate("\\cA", "u").is_ok());
        assert!(validate("\\0", "u").is_ok());
        // legacy octal escapes are Annex B
        assert!(validate("\\07", "").is_ok());
        assert_eq!(err("\\07", "u").message, "Invalid escape");
        // \u{...} requires the u flag
        assert!(validate("\\u{41}", "").is_ok()); // quantified 'u' character
        assert_eq!(err("\\x4", "u").message, "Invalid escape");
    }

    #[test]
    fn identity_escapes() {
        assert!(validate("\\$", "u").is_ok());
        assert!(validate("\\/", "u").is_ok());
        assert_eq!(err("\\a", "u").message, "Invalid escape");
        assert!(validate("\\a", "").is_ok());
    }

    #[test]
    fn property_escapes() {
        assert!(validate("\\p{Lu}", "u").is_ok());
        assert!(validate("\\p{General_Category=Lu}", "u").is_ok());
        assert!(validate("\\p{Script=Hiragana}", "u").is_ok());
        assert!(validate("\\P{ASCII}", "u").is_ok());
        assert_eq!(err("\\p{Bogus}", "u").message, "Invalid property name");
        assert_eq!(err("\\p{Lu", "u").message, "Invalid property name");
        assert_eq!(err("\\p", "u").message, "Invalid property name");
        // without the u flag, \p is an identity escape in Annex B
        assert!(validate("\\p{Lu}", "").is_ok());
    }

    #[test]
    fn property_escapes_are_edition_gated() {
        assert_eq!(
            validate_at("\\p{Lu}", "u", EcmaVersion::ES2017)
                .unwrap_err()
                .message,
            "Invalid escape"
        );
    }

    #[test]
    fn properties_of_strings_require_v_mode() {
        assert!(validate("\\p{RGI_Emoji}", "v").is_ok());
        assert_eq!(err("\\p{RGI_Emoji}", "u").message, "Invalid property name");
        assert_eq!(err("\\P{RGI_Emoji}", "v").message, "Invalid property name");
    }

    #[test]
    fn v_mode_set_expressions() {
        assert!(validate("[a--b]", "v").is_ok());
        assert!(validate("[a&&b]", "v").is_ok());
        assert!(validate("[a&&b&&c]", "v").is_ok());
        assert!(validate("[[a-z]--[aeiou]]", "v").is_ok());
        assert!(validate("[\\d&&[0-5]]", "v").is_ok());
        // operators may not be mixed in one expression
        assert!(validate("[a&&b--c]", "v").is_err());
        assert!(validate("[a--b&&c]", "v").is_err());
    }

    #[test]
    fn v_mode_operators_need_v_flag() {
        // without v, `a-` reads as a range whose bounds are out of order
        assert_eq!(err("[a--b]", "u").message, "Range out of order in character class");
        assert_eq!(err("[a--b]", "").message, "Range out of order in character class");
        assert_eq!(err("[a--b]", "").index, 4);
    }

    #[test]
    fn v_mode_reserved_punctuators() {
        assert_eq!(
            err("[a++b]", "v").message,
            "Invalid set operation in character class"
        );
        assert!(validate("[\\&\\-]", "v").is_ok());
        assert!(validate("[-]", "v").is_err());
        assert!(validate("[-]", "u").is_ok());
    }

    #[test]
    fn class_string_disjunctions() {
        assert!(validate("[\\q{abc|d}]", "v").is_ok());
        assert!(validate("[\\q{}]", "v").is_ok());
        assert_eq!(
            err("[\\q{ab]", "v").message,
            "Unterminated class string disjunction"
        );
        // \q is exclusive to v mode
        assert_eq!(err("[\\q{a}]", "u").message, "Invalid escape");
    }

    #[test]
    fn negated_classes_must_not_contain_strings() {
        assert!(validate("[^\\q{a}]", "v").is_ok()); // single char alternative
        assert_eq!(
            err("[^\\q{ab}]", "v").message,
            "Negated character class may contain strings"
        );
        assert_eq!(
            err("[^\\p{RGI_Emoji}]", "v").message,
            "Negated character class may contain strings"
        );
        // an intersection has strings only when all operands do
        assert!(validate("[\\q{ab}&&\\q{ab|cd}]", "v").is_ok());
        assert_eq!(
            err("[^\\q{ab}&&\\q{ab|cd}]", "v").message,
            "Negated character class may contain strings"
        );
        assert!(validate("[^\\q{ab}--b]", "v").is_err());
        assert!(validate("[^b--\\q{ab}]", "v").is_ok());
    }

    #[test]
    fn surrogate_pair_escapes_combine_in_unicode_mode() {
        assert!(validate("\\uD83D\\uDE00", "u").is_ok());
        assert!(validate("[\\uD800-\\uDBFF]", "u").is_ok());
    }

    #[test]
    fn strict_option_disables_annex_b() {
        let strict = ParseOptions {
            strict: true,
            ecma_version: EcmaVersion::ES2025,
        };
        assert_eq!(
            validate_with("a{", "", strict).unwrap_err().message,
            "Incomplete quantifier"
        );
        assert_eq!(
            validate_with("\\07", "", strict).unwrap_err().message,
            "Invalid escape"
        );
        assert!(validate_with("(?=a)*", "", strict).is_err());
    }

    #[test]
    fn unmatched_bracket_errors() {
        assert_eq!(err("]", "u").message, "Lone quantifier brackets");
        assert_eq!(err("}", "u").message, "Lone quantifier brackets");
        assert!(validate("]", "").is_ok());
        assert!(validate("}", "").is_ok());
    }
}
