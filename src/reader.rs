/// Character cursor over a pattern or flags text.
/// Offsets are character indices, so `rewind` can jump to any position a
/// caller saved earlier.
pub(crate) struct Reader {
    chars: Vec<char>,
    index: usize,
}

impl Reader {
    pub(crate) fn new(source: &str) -> Self {
        Reader {
            chars: source.chars().collect(),
            index: 0,
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// The character at the cursor, or `None` at the end of input.
    pub(crate) fn current(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    /// The character after the current one.
    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.index + 1).copied()
    }

    pub(crate) fn peek2(&self) -> Option<char> {
        self.chars.get(self.index + 2).copied()
    }

    pub(crate) fn peek3(&self) -> Option<char> {
        self.chars.get(self.index + 3).copied()
    }

    pub(crate) fn advance(&mut self) {
        if self.index < self.chars.len() {
            self.index += 1;
        }
    }

    pub(crate) fn rewind(&mut self, index: usize) {
        self.index = index;
    }

    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.current() == Some(c) {
            self.index += 1;
            return true;
        }
        false
    }

    pub(crate) fn eat2(&mut self, c1: char, c2: char) -> bool {
        if self.current() == Some(c1) && self.peek() == Some(c2) {
            self.index += 2;
            return true;
        }
        false
    }

    pub(crate) fn eat3(&mut self, c1: char, c2: char, c3: char) -> bool {
        if self.current() == Some(c1) && self.peek() == Some(c2) && self.peek2() == Some(c3) {
            self.index += 3;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_and_advance() {
        let mut r = Reader::new("ab");
        assert_eq!(r.current(), Some('a'));
        r.advance();
        assert_eq!(r.current(), Some('b'));
        r.advance();
        assert_eq!(r.current(), None);
        // advancing past the end stays put
        r.advance();
        assert_eq!(r.index(), 2);
    }

    #[test]
    fn peeks_look_ahead_without_moving() {
        let r = Reader::new("abcd");
        assert_eq!(r.peek(), Some('b'));
        assert_eq!(r.peek2(), Some('c'));
        assert_eq!(r.peek3(), Some('d'));
        assert_eq!(r.index(), 0);
    }

    #[test]
    fn eat_moves_only_on_match() {
        let mut r = Reader::new("x*");
        assert!(!r.eat('*'));
        assert!(r.eat('x'));
        assert!(r.eat('*'));
        assert_eq!(r.current(), None);
    }

    #[test]
    fn eat2_eat3_are_all_or_nothing() {
        let mut r = Reader::new("&&-");
        assert!(!r.eat2('&', '-'));
        assert_eq!(r.index(), 0);
        assert!(r.eat2('&', '&'));
        assert!(!r.eat3('-', '-', '-'));
        assert_eq!(r.index(), 2);
    }

    #[test]
    fn rewind_restores_a_saved_position() {
        let mut r = Reader::new("abc");
        r.advance();
        let saved = r.index();
        r.advance();
        r.rewind(saved);
        assert_eq!(r.current(), Some('b'));
    }

    #[test]
    fn indices_are_char_counts_not_bytes() {
        let mut r = Reader::new("あ!");
        assert!(r.eat('あ'));
        assert_eq!(r.index(), 1);
        assert_eq!(r.current(), Some('!'));
    }
}
