/// Position-tracking reader over source text.
///
/// Every lexical rule is built from [`Cursor::peek_if`] and
/// [`Cursor::try_literal`], which either consume input or leave the offset
/// exactly where it was.
pub struct Cursor {
    input: Vec<char>,
    position: usize,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Cursor {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Current offset, in characters.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Returns the character at the offset and advances past it.
    ///
    /// At end of input nothing is consumed, but the offset still moves so
    /// that a following [`Cursor::step_back`] is always balanced.
    pub fn next(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied();
        self.position += 1;
        ch
    }

    pub fn step_back(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Matches `literal` exactly at the offset, or restores the offset.
    pub fn try_literal(&mut self, literal: &str) -> bool {
        let start = self.position;
        for expected in literal.chars() {
            if self.input.get(self.position) != Some(&expected) {
                self.position = start;
                return false;
            }
            self.position += 1;
        }
        true
    }

    /// Samples one character and keeps it only if `predicate` accepts it.
    ///
    /// The predicate sees `None` at end of input.
    pub fn peek_if(&mut self, predicate: impl FnOnce(Option<char>) -> bool) -> bool {
        let ch = self.next();
        if predicate(ch) && ch.is_some() {
            true
        } else {
            self.step_back();
            false
        }
    }

    /// Like [`Cursor::peek_if`], but hands back the consumed character.
    pub fn take_if(&mut self, predicate: impl FnOnce(char) -> bool) -> Option<char> {
        let mut taken = None;
        self.peek_if(|ch| match ch {
            Some(c) if predicate(c) => {
                taken = Some(c);
                true
            }
            _ => false,
        });
        taken
    }

    /// Reads consecutive digits in `base`, returning their values.
    pub fn digit_sequence(&mut self, base: u32) -> Vec<u32> {
        let mut digits = Vec::new();
        while let Some(ch) = self.take_if(|c| c.is_digit(base)) {
            if let Some(d) = ch.to_digit(base) {
                digits.push(d);
            }
        }
        digits
    }
}
