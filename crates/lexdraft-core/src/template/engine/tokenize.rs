//! Tokenization for template engine
//!
//! Provides O(n) tokenization using a state machine. The stream only finds
//! `{{...}}` spans and sorts them into expressions, block openers, `else` and
//! block closers; argument parsing happens later in `expr`.

/// Token classification
///
/// Classification looks only at the first character of the trimmed content:
/// `#` opens a block, `/` closes one, the bare word `else` switches branches,
/// anything else is an expression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// `{{key}}`, `{{nested.key}}` or `{{helper arg ...}}`
    Expression { source: String },

    /// `{{#each items |item|}}`, `{{#level 2}}`
    BlockStart { keyword: String, args: String },

    /// `{{else}}` inside a block
    Else,

    /// `{{/each}}`
    BlockEnd { keyword: String },
}

/// A single {{...}} token with position and classification
///
/// Positions are byte offsets into the original text, so the parser can slice
/// the literal text between consecutive tokens without copying.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    /// Token classification
    pub kind: TokenKind,
    /// Absolute byte position of `{{` in template
    pub start: usize,
    /// Total length in bytes including {{ and }}
    pub length: usize,
    /// Number of backslashes before `{{`
    /// Odd count = escaped (literal), even = real (processed)
    pub backslash_count: usize,
    /// Line number where token starts (for error messages)
    pub line: usize,
}

impl Token {
    /// Check if this token is escaped (odd backslash count)
    pub fn is_escaped(&self) -> bool {
        self.backslash_count % 2 == 1
    }

    /// Byte position just past the closing `}}`
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Tokenization state machine
///
/// ```text
/// Normal ──{───> SeenLBrace ──{───> InToken ──}───> SeenRBrace ──}───> [Yield Token] → Normal
///   │               │                  │                  │
///   │ (not {)       │ (not {)          │ (not })          │ (not })
///   └──────────────>└─────────────────>└─────────────────>└──────────> Normal
/// ```
///
/// An unterminated `{{` leaves the stream in `InToken` until input ends; the
/// parser reports it from the trailing text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanState {
    /// Regular text, counting consecutive backslashes
    Normal { backslash_count: usize },

    /// Seen first `{`, checking for second `{`
    SeenLBrace {
        /// Offset of the `{`
        pos: usize,
        /// Backslashes that preceded it
        backslash_count: usize,
    },

    /// Inside `{{...}}`, scanning until `}}`
    ///
    /// Newlines inside a token still advance the line counter, but the token
    /// reports the line it opened on.
    InToken {
        /// Offset of the opening `{{`
        start: usize,
        /// Offset just past `{{`
        content_start: usize,
        /// Line of the opening `{{`
        start_line: usize,
        backslash_count: usize,
    },

    /// Seen first `}` inside token, checking for second `}`
    SeenRBrace {
        start: usize,
        content_start: usize,
        start_line: usize,
        /// Offset of the first `}`, which ends the content if a second follows
        rbrace_pos: usize,
        backslash_count: usize,
    },
}

/// Iterator over tokens in a template string
///
/// Each byte is processed exactly once in a forward-only manner. A byte that
/// breaks a `{`/`}` pair is re-read once in the fallback state, so the total
/// work stays linear; `step_count` enforces that bound.
///
/// Escaped tokens (odd backslash count) are still yielded; deciding to print
/// them literally is the parser's job.
pub(crate) struct TokenStream<'a> {
    bytes: &'a [u8],
    /// Next byte to read
    pos: usize,
    state: ScanState,
    /// 1-based line of `pos`
    line: usize,
    /// Step count for O(n) runaway protection
    step_count: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            state: ScanState::Normal { backslash_count: 0 },
            line: 1,
            step_count: 0,
        }
    }

    /// Current line (after the last consumed byte)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Sort trimmed token content into a [`TokenKind`].
    ///
    /// - `#each items |item|` → BlockStart { keyword: "each", args: "items |item|" }
    /// - `/each` → BlockEnd
    /// - `else` → Else
    /// - `upper client.name` → Expression
    fn classify_content(&self, content: &str) -> TokenKind {
        let trimmed = content.trim();

        if let Some(rest) = trimmed.strip_prefix('#') {
            let rest = rest.trim_start();
            let (keyword, args) = match rest.find(char::is_whitespace) {
                Some(split) => (&rest[..split], rest[split..].trim()),
                None => (rest, ""),
            };
            TokenKind::BlockStart {
                keyword: keyword.to_string(),
                args: args.to_string(),
            }
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            TokenKind::BlockEnd {
                keyword: rest.trim().to_string(),
            }
        } else if trimmed == "else" {
            TokenKind::Else
        } else {
            TokenKind::Expression {
                source: trimmed.to_string(),
            }
        }
    }

    #[inline]
    fn should_continue(&mut self, max_steps: usize) -> bool {
        self.step_count += 1;
        self.step_count <= max_steps && self.pos < self.bytes.len()
    }

    #[cfg(test)]
    #[inline]
    fn record_test_step() {
        test_counter::inc();
    }

    fn process_normal_state(&mut self, byte: u8, backslash_count: usize) {
        if byte == b'\\' {
            self.state = ScanState::Normal {
                backslash_count: backslash_count + 1,
            };
        } else if byte == b'{' {
            self.state = ScanState::SeenLBrace {
                pos: self.pos,
                backslash_count,
            };
        } else {
            if byte == b'\n' {
                self.line += 1;
            }
            self.state = ScanState::Normal { backslash_count: 0 };
        }
        self.pos += 1;
    }

    /// Returns false if the byte must be reprocessed in Normal state
    fn process_seen_lbrace(&mut self, byte: u8, lbrace_pos: usize, backslash_count: usize) -> bool {
        if byte == b'{' {
            self.state = ScanState::InToken {
                start: lbrace_pos,
                content_start: self.pos + 1,
                start_line: self.line,
                backslash_count,
            };
            self.pos += 1;
            true
        } else {
            self.state = ScanState::Normal { backslash_count: 0 };
            false
        }
    }

    fn process_in_token(
        &mut self,
        byte: u8,
        start: usize,
        content_start: usize,
        start_line: usize,
        backslash_count: usize,
    ) {
        if byte == b'}' {
            self.state = ScanState::SeenRBrace {
                start,
                content_start,
                start_line,
                rbrace_pos: self.pos,
                backslash_count,
            };
        } else if byte == b'\n' {
            self.line += 1;
        }
        self.pos += 1;
    }

    /// Close the token on a second `}`, otherwise fall back to `InToken` and
    /// let the same byte be read again there.
    ///
    /// Returns (token, advanced)
    fn process_seen_rbrace(&mut self, byte: u8, state: (usize, usize, usize, usize, usize)) -> (Option<Token>, bool) {
        let (start, content_start, start_line, rbrace_pos, backslash_count) = state;
        if byte == b'}' {
            let content = std::str::from_utf8(&self.bytes[content_start..rbrace_pos]).unwrap_or("");

            let token = Token {
                kind: self.classify_content(content),
                start,
                length: self.pos + 1 - start,
                backslash_count,
                line: start_line,
            };

            self.state = ScanState::Normal { backslash_count: 0 };
            self.pos += 1;

            (Some(token), true)
        } else {
            self.state = ScanState::InToken {
                start,
                content_start,
                start_line,
                backslash_count,
            };
            (None, false)
        }
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        const MAX_STEPS_MULTIPLIER: usize = 3;
        let max_steps = self.bytes.len().saturating_mul(MAX_STEPS_MULTIPLIER);

        loop {
            if !self.should_continue(max_steps) {
                return None;
            }

            let byte = self.bytes[self.pos];
            #[cfg(test)]
            Self::record_test_step();

            match self.state.clone() {
                ScanState::Normal { backslash_count } => {
                    self.process_normal_state(byte, backslash_count)
                }
                ScanState::SeenLBrace {
                    pos,
                    backslash_count,
                } => {
                    if !self.process_seen_lbrace(byte, pos, backslash_count) {
                        continue;
                    }
                }
                ScanState::InToken {
                    start,
                    content_start,
                    start_line,
                    backslash_count,
                } => self.process_in_token(byte, start, content_start, start_line, backslash_count),
                ScanState::SeenRBrace {
                    start,
                    content_start,
                    start_line,
                    rbrace_pos,
                    backslash_count,
                } => {
                    let (token, advanced) = self.process_seen_rbrace(
                        byte,
                        (start, content_start, start_line, rbrace_pos, backslash_count),
                    );
                    if let Some(token) = token {
                        return Some(token);
                    }
                    if !advanced {
                        continue;
                    }
                }
            }
        }
    }
}
