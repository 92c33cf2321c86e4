/// Character predicates for the pattern grammar.
pub(crate) mod properties;

/// SyntaxCharacter: the characters that cannot appear bare in a pattern.
pub(crate) fn is_syntax_character(c: char) -> bool {
    matches!(
        c,
        '^' | '$' | '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|'
    )
}

/// ClassSetSyntaxCharacter: characters with syntactic meaning inside a
/// `v`-mode class.
pub(crate) fn is_class_set_syntax_character(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '[' | ']' | '{' | '}' | '/' | '-' | '\\' | '|'
    )
}

/// Characters that are reserved inside a `v`-mode class when doubled,
/// e.g. `&&` or `!!`.
pub(crate) fn is_class_set_reserved_double_punctuator_character(c: char) -> bool {
    matches!(
        c,
        '&' | '!'
            | '#'
            | '$'
            | '%'
            | '*'
            | '+'
            | ','
            | '.'
            | ':'
            | ';'
            | '<'
            | '='
            | '>'
            | '?'
            | '@'
            | '^'
            | '`'
            | '~'
    )
}

/// ClassSetReservedPunctuator: punctuators that may only appear escaped
/// inside a `v`-mode class.
pub(crate) fn is_class_set_reserved_punctuator(c: char) -> bool {
    matches!(
        c,
        '!' | '#' | '%' | '&' | ',' | '-' | ':' | ';' | '<' | '=' | '>' | '@' | '`' | '~'
    )
}

/// First character of a capturing group name.
pub(crate) fn is_identifier_start_char(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

/// Subsequent characters of a capturing group name. ZWNJ and ZWJ are legal
/// continuations even though they are not XID_Continue.
pub(crate) fn is_identifier_part_char(c: char) -> bool {
    c == '$' || c == '\u{200C}' || c == '\u{200D}' || unicode_ident::is_xid_continue(c)
}

pub(crate) fn is_id_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Unicode property names are latin letters and underscores.
pub(crate) fn is_unicode_property_name_character(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Property values additionally allow digits, e.g. `Nd`... values never
/// start the lexical scan though, so digits are fine throughout.
pub(crate) fn is_unicode_property_value_character(c: char) -> bool {
    is_unicode_property_name_character(c) || c.is_ascii_digit()
}

pub(crate) fn is_lead_surrogate(value: u32) -> bool {
    (0xD800..=0xDBFF).contains(&value)
}

pub(crate) fn is_trail_surrogate(value: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&value)
}

pub(crate) fn combine_surrogate_pair(lead: u32, trail: u32) -> u32 {
    (lead - 0xD800) * 0x400 + (trail - 0xDC00) + 0x10000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_characters() {
        for c in "^$\\.*+?()[]{}|".chars() {
            assert!(is_syntax_character(c), "{c}");
        }
        assert!(!is_syntax_character('-'));
        assert!(!is_syntax_character('a'));
    }

    #[test]
    fn class_set_punctuators() {
        assert!(is_class_set_syntax_character('-'));
        assert!(!is_class_set_syntax_character('&'));
        assert!(is_class_set_reserved_double_punctuator_character('&'));
        assert!(is_class_set_reserved_punctuator('~'));
        assert!(!is_class_set_reserved_punctuator('*'));
    }

    #[test]
    fn group_name_characters() {
        assert!(is_identifier_start_char('$'));
        assert!(is_identifier_start_char('_'));
        assert!(is_identifier_start_char('あ'));
        assert!(!is_identifier_start_char('1'));
        assert!(is_identifier_part_char('1'));
        assert!(is_identifier_part_char('\u{200D}'));
        assert!(!is_identifier_part_char('-'));
    }

    #[test]
    fn surrogate_combination() {
        assert!(is_lead_surrogate(0xD83D));
        assert!(is_trail_surrogate(0xDE00));
        assert_eq!(combine_surrogate_pair(0xD83D, 0xDE00), 0x1F600);
    }
}
