/// Character cursor over the source text.
///
/// Positions are character offsets. The current character is cached and is only
/// refreshed by [`Cursor::advance`], so [`Cursor::jump`] leaves it stale until the
/// next advance.
#[derive(Debug)]
pub struct Cursor {
    chars: Vec<char>,
    position: usize,
    current: Option<char>,
    line: u32,
    column: u32,
}

impl Cursor {
    pub fn new(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let current = chars.first().copied();
        Self {
            chars,
            position: 0,
            current,
            line: 1,
            column: 1,
        }
    }

    pub fn current(&self) -> Option<char> {
        self.current
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// Moves one character forward.
    ///
    /// The line counter only moves when the character being left is a newline and
    /// another character follows; the column then restarts at zero.
    pub fn advance(&mut self) {
        self.position += 1;
        self.column += 1;
        match self.chars.get(self.position) {
            None => self.current = None,
            Some(&next) => {
                if self.current == Some('\n') {
                    self.line += 1;
                    self.column = 0;
                }
                self.current = Some(next);
            }
        }
    }

    /// Moves the position forward without refreshing the current character.
    pub fn jump(&mut self, count: usize) {
        self.position += count;
        self.column += count as u32;
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        let mut rest = self.chars.iter().skip(self.position);
        prefix.chars().all(|c| rest.next() == Some(&c))
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;

    #[test]
    fn column_restarts_at_zero_after_newline() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance();
        assert_eq!((cursor.line(), cursor.column()), (1, 2));
        cursor.advance();
        assert_eq!(cursor.current(), Some('b'));
        assert_eq!((cursor.line(), cursor.column()), (2, 0));
    }

    #[test]
    fn trailing_newline_is_not_counted() {
        let mut cursor = Cursor::new("a\n");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.current(), None);
        assert_eq!((cursor.line(), cursor.column()), (1, 3));
    }

    #[test]
    fn jump_keeps_the_stale_character() {
        let mut cursor = Cursor::new("tea\nx");
        assert!(cursor.starts_with("tea"));
        cursor.jump(3);
        assert_eq!(cursor.current(), Some('t'));
        cursor.advance();
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.current(), Some('x'));
        assert_eq!(cursor.line(), 1);
    }
}
