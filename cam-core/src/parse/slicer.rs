// A cursor over program text. All opcodes and brackets are ASCII,
// but the cursor steps whole chars so that stray multi-byte input
// is reported instead of split.

#[derive(Clone)]
pub struct StringSlicer<'input> {
    string: &'input str,
    idx: usize,
}

impl<'input> StringSlicer<'input> {
    pub fn new(input: &'input str) -> Self {
        StringSlicer {
            string: input,
            idx: 0,
        }
    }

    pub fn pos(&self) -> usize {
        self.idx
    }

    pub fn hit_end(&self) -> bool {
        self.idx >= self.string.len()
    }

    pub fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.idx += ch.len_utf8();
        Some(ch)
    }

    pub fn peek(&self) -> Option<char> {
        self.string[self.idx..].chars().next()
    }

    pub fn test_peek<F>(&self, mut test: F) -> bool
    where
        F: FnMut(char) -> bool,
    {
        self.peek().map_or(false, |ch| test(ch))
    }

    // everything from `start` to the end of the input
    pub fn from(&self, start: usize) -> &'input str {
        &self.string[start..]
    }

    /// Consumes a bracketed group `( ... )` and returns its contents.
    ///
    /// Nested brackets are skipped by tracking the depth, the group ends
    /// where the depth first returns to zero. Returns `None` without
    /// moving if the cursor is not on `(` or the group is never closed.
    pub fn group(&mut self) -> Option<&'input str> {
        if !self.test_peek(|c| c == '(') {
            return None;
        }
        let start = self.idx + 1;
        let mut depth = 1usize;
        for (i, b) in self.string.as_bytes()[start..].iter().enumerate() {
            match *b {
                b'(' => depth += 1,
                b')' => depth -= 1,
                _ => continue,
            }
            if depth == 0 {
                let end = start + i;
                self.idx = end + 1;
                return Some(&self.string[start..end]);
            }
        }
        None
    }
}
