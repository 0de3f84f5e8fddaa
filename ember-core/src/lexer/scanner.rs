use super::charstream::CharStream;

/// Lexeme-level reads on top of a [`CharStream`]: trivia skipping,
/// identifiers, numbers and quoted strings. Decides where a lexeme ends,
/// never which token it becomes.
#[derive(Debug)]
pub struct Scanner<T: Iterator<Item = (u32, char)>> {
    stream: CharStream<T>,
}

impl<T: Iterator<Item = (u32, char)>> Scanner<T> {
    pub fn new(input: T) -> Self {
        Self {
            stream: CharStream::new(input)
        }
    }

    pub fn ch(&self) -> Option<char> {
        self.stream.ch()
    }

    pub fn peek(&self) -> Option<char> {
        self.stream.peek()
    }

    pub fn position(&self) -> u32 {
        self.stream.position()
    }

    pub fn next_char(&mut self) -> Option<char> {
        self.stream.next_char()
    }

    /// Skips whitespace, `//` line comments and `/* */` block comments in
    /// any interleaving.
    pub fn skip_trivia(&mut self) {
        loop {
            self.stream.skip_while(|ch| matches!(ch, ' ' | '\t' | '\r' | '\n' | '\x0C'));

            match (self.stream.ch(), self.stream.peek()) {
                (Some('/'), Some('/')) => self.skip_line_comment(),
                (Some('/'), Some('*')) => self.skip_block_comment(),
                _ => break
            }
        }
    }

    fn skip_line_comment(&mut self) {
        self.stream.skip_while(|ch| ch != '\n');
    }

    fn skip_block_comment(&mut self) {
        self.stream.next_char(); // slash
        self.stream.next_char(); // asterisk

        loop {
            match (self.stream.ch(), self.stream.peek()) {
                (Some('*'), Some('/')) => {
                    self.stream.next_char();
                    self.stream.next_char();
                    break;
                },
                // an unterminated block comment swallows the rest of the input
                (None, _) => break,
                _ => {
                    self.stream.next_char();
                }
            }
        }
    }

    pub fn read_identifier(&mut self) -> String {
        let mut ident = String::new();

        while let Some(ch) = self.stream.ch() {
            if !ch.is_ascii_alphanumeric() && ch != '_' {
                break;
            }

            ident.push(ch);
            self.stream.next_char();
        }

        ident
    }

    /// Reads a digit run, scanning through at most one `.`.
    pub fn read_number(&mut self) -> String {
        let mut number = String::new();
        let mut has_dot = false;

        while let Some(ch) = self.stream.ch() {
            match ch {
                ch if ch.is_ascii_digit() => number.push(ch),
                '.' if !has_dot => {
                    has_dot = true;
                    number.push(ch);
                },
                _ => break
            }

            self.stream.next_char();
        }

        number
    }

    /// Reads a string literal delimited by the quote under the cursor.
    /// Returns the decoded text and whether the closing quote was found.
    pub fn read_string(&mut self) -> (String, bool) {
        let quote = self.stream.ch();
        self.stream.next_char(); // opening quote

        let mut text = String::new();

        loop {
            match self.stream.ch() {
                None => return (text, false),
                Some('\\') => text.push(self.escape_sequence()),
                ch if ch == quote => {
                    self.stream.next_char(); // closing quote
                    return (text, true);
                },
                Some(ch) => {
                    text.push(ch);
                    self.stream.next_char();
                }
            }
        }
    }

    fn escape_sequence(&mut self) -> char {
        self.stream.next_char(); // backslash

        // `\" \' \\` and any unknown escape decode to the character itself
        let escaped = match self.stream.ch() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some(ch) => ch,
            None => '\\',
        };

        if self.stream.ch().is_some() {
            self.stream.next_char();
        }

        escaped
    }
}
