//! The Quill scanner/lexer.
//!
//! Converts source text into tokens. Positions are byte offsets into the
//! text. Whitespace and comments are trivia: by default they are skipped and
//! become the leading trivia of the next token (`full_start..start`); a
//! scanner built with [`Scanner::with_trivia`] returns them as tokens.

use crate::char_codes::*;
use crate::token::{CommentRange, TokenInfo};
use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::TokenFlags;
use quill_core::text::{TextPos, TextRange, TextSpan};
use quill_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use std::iter::FusedIterator;

/// Saved scanner state for lookahead.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pub pos: usize,
    pub full_start: usize,
    pub token_start: usize,
    pub token: SyntaxKind,
    pub token_value: String,
    pub token_flags: TokenFlags,
    pub pending_line_break: bool,
    pub diagnostics_len: usize,
}

/// The scanner converts Quill source text into tokens.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    /// The source text being scanned.
    text: &'a str,
    /// Current byte position in the text.
    pos: usize,
    /// Start of the current token's leading trivia.
    full_start: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    /// The current token kind.
    token: SyntaxKind,
    /// The text of the current token.
    token_value: String,
    /// Token flags for the current token.
    token_flags: TokenFlags,
    /// Return trivia as tokens instead of skipping it.
    preserve_trivia: bool,
    /// Trivia mode only: a line break was returned since the last real token.
    pending_line_break: bool,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            preserve_trivia: false,
            pending_line_break: false,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Create a scanner that returns comments and whitespace as tokens.
    pub fn with_trivia(text: &'a str) -> Self {
        let mut scanner = Self::new(text);
        scanner.preserve_trivia = true;
        scanner
    }

    /// Create a scanner positioned at `pos`. Positions past the end clamp to
    /// the end; positions inside a character move to the next character.
    pub fn at(text: &'a str, pos: TextPos) -> Self {
        let mut scanner = Self::new(text);
        scanner.set_pos(pos as usize);
        scanner
    }

    /// Get the full source text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Look ahead: save state, call f, restore state and return result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Try scanning: save state, call f, if result is None restore state.
    pub fn try_scan<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let state = self.save_state();
        let result = f(self);
        if result.is_none() {
            self.restore_state(state);
        }
        result
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Get the current token's text value.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Get the start of the current token's leading trivia.
    #[inline]
    pub fn token_full_start(&self) -> TextPos {
        self.full_start as TextPos
    }

    /// Get the start position of the current token (after trivia).
    #[inline]
    pub fn token_start(&self) -> TextPos {
        self.token_start as TextPos
    }

    /// Get the current position (end of current token).
    #[inline]
    pub fn token_end(&self) -> TextPos {
        self.pos as TextPos
    }

    /// Get the current token flags.
    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    /// Whether the current token was preceded by a line break.
    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Get the accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Get a TokenInfo for the current token.
    pub fn token_info(&self) -> TokenInfo {
        TokenInfo::new(
            self.token,
            self.full_start as TextPos,
            self.token_start as TextPos,
            self.pos as TextPos,
        )
        .with_text(self.token_value.clone())
        .with_flags(self.token_flags)
    }

    /// Save the full scanner state for lookahead.
    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            pending_line_break: self.pending_line_break,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    /// Restore the full scanner state from a saved state. Diagnostics
    /// reported since the state was saved are discarded.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.full_start = state.full_start;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
        self.pending_line_break = state.pending_line_break;
        self.diagnostics.truncate(state.diagnostics_len);
    }

    /// Reset the scanner to a specific position.
    pub fn set_pos(&mut self, pos: usize) {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos += 1;
        }
        self.pos = pos;
        self.full_start = pos;
        self.token_start = pos;
        self.token = SyntaxKind::Unknown;
        self.token_value.clear();
        self.token_flags = TokenFlags::NONE;
        self.pending_line_break = false;
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    /// The byte at `self.pos + offset`.
    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    /// The character at the current position.
    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Whether we've reached the end of the text.
    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn error_at(&mut self, start: usize, length: usize, message: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics.add(Diagnostic::at(
            TextSpan::new(start as TextPos, length as TextPos),
            message,
            args,
        ));
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();
        self.full_start = self.pos;

        if self.preserve_trivia {
            if let Some(kind) = self.scan_trivia_piece() {
                if self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK) {
                    self.pending_line_break = true;
                    self.token_flags.remove(TokenFlags::PRECEDING_LINE_BREAK);
                }
                self.token_start = self.full_start;
                self.token = kind;
                self.token_value.push_str(&self.text[self.token_start..self.pos]);
                return self.token;
            }
            if std::mem::take(&mut self.pending_line_break) {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
            }
        } else {
            while self.scan_trivia_piece().is_some() {}
            self.token_flags.remove(TokenFlags::UNTERMINATED);
        }
        self.token_start = self.pos;

        if self.is_eof() {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        }

        let ch = self.bytes()[self.pos];
        self.token = match ch {
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b'~' => self.single(SyntaxKind::TildeToken),
            b':' => self.single(SyntaxKind::ColonToken),

            b'.' => self.scan_dot(),
            b'?' => self.scan_question(),
            b'<' => self.scan_less_than(),
            b'>' => self.scan_greater_than(),
            b'=' => self.scan_equals(),
            b'!' => self.scan_exclamation(),
            b'+' => self.scan_plus(),
            b'-' => self.scan_minus(),
            b'*' => self.scan_asterisk(),
            b'/' => self.scan_slash(),
            b'%' => self.scan_percent(),
            b'&' => self.scan_ampersand(),
            b'|' => self.scan_bar(),
            b'^' => self.scan_caret(),

            b'\'' | b'"' => self.scan_string_literal(ch),

            b'0'..=b'9' => self.scan_number(),

            _ => match self.current_char() {
                Some(c) if is_identifier_start(c) => self.scan_identifier(),
                Some(c) => {
                    let start = self.pos;
                    self.pos += c.len_utf8();
                    self.error_at(start, c.len_utf8(), &messages::INVALID_CHARACTER, &[]);
                    SyntaxKind::Unknown
                }
                None => SyntaxKind::EndOfFileToken,
            },
        };

        if self.token_value.is_empty() && self.token != SyntaxKind::StringLiteral {
            self.token_value.push_str(&self.text[self.token_start..self.pos]);
        }
        self.token
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    /// Consume one piece of trivia at the current position and return its
    /// kind, or `None` if the next character starts a real token.
    fn scan_trivia_piece(&mut self) -> Option<SyntaxKind> {
        let bytes = self.bytes();
        let start = self.pos;
        let b = *bytes.get(start)?;
        match b {
            b'#' if start == 0 && bytes.get(1) == Some(&b'!') => {
                self.pos = 2 + find_line_break(&bytes[2..]);
                Some(SyntaxKind::ShebangTrivia)
            }
            b'\r' => {
                self.pos += if bytes.get(start + 1) == Some(&b'\n') { 2 } else { 1 };
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                Some(SyntaxKind::NewLineTrivia)
            }
            b'\n' => {
                self.pos += 1;
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                Some(SyntaxKind::NewLineTrivia)
            }
            b' ' | b'\t' | 0x0B | 0x0C => {
                self.pos += 1;
                self.skip_single_line_whitespace();
                Some(SyntaxKind::WhitespaceTrivia)
            }
            b'/' => match bytes.get(start + 1) {
                Some(b'/') => {
                    self.pos = start + 2 + find_line_break(&bytes[start + 2..]);
                    Some(SyntaxKind::SingleLineCommentTrivia)
                }
                Some(b'*') => {
                    self.scan_multi_line_comment();
                    Some(SyntaxKind::MultiLineCommentTrivia)
                }
                _ => None,
            },
            _ if b >= 0x80 => {
                let ch = self.current_char()?;
                if is_line_break(ch) {
                    self.pos += ch.len_utf8();
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    Some(SyntaxKind::NewLineTrivia)
                } else if is_white_space_single_line(ch) {
                    self.pos += ch.len_utf8();
                    self.skip_single_line_whitespace();
                    Some(SyntaxKind::WhitespaceTrivia)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn skip_single_line_whitespace(&mut self) {
        while let Some(b) = self.peek(0) {
            match b {
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                _ if b >= 0x80 => match self.current_char() {
                    Some(ch) if is_white_space_single_line(ch) => self.pos += ch.len_utf8(),
                    _ => return,
                },
                _ => return,
            }
        }
    }

    fn scan_multi_line_comment(&mut self) {
        let start = self.pos;
        let body_start = start + 2;
        let body = &self.bytes()[body_start..];
        match memchr::memmem::find(body, b"*/") {
            Some(close) => {
                if contains_line_break(&body[..close]) {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                }
                self.pos = body_start + close + 2;
            }
            None => {
                if contains_line_break(body) {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                }
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.pos = self.text.len();
                self.error_at(start, 2, &messages::ASTERISK_SLASH_EXPECTED, &[]);
            }
        }
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    /// Consume `len` bytes and return `kind`.
    #[inline]
    fn take(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.peek(1).map_or(false, |b| is_digit(b as char)) {
            self.scan_number()
        } else {
            self.take(1, SyntaxKind::DotToken)
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'?'), Some(b'=')) => self.take(3, SyntaxKind::QuestionQuestionEqualsToken),
            (Some(b'?'), _) => self.take(2, SyntaxKind::QuestionQuestionToken),
            _ => self.take(1, SyntaxKind::QuestionToken),
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'<'), Some(b'=')) => self.take(3, SyntaxKind::LessThanLessThanEqualsToken),
            (Some(b'<'), _) => self.take(2, SyntaxKind::LessThanLessThanToken),
            (Some(b'='), _) => self.take(2, SyntaxKind::LessThanEqualsToken),
            _ => self.take(1, SyntaxKind::LessThanToken),
        }
    }

    fn scan_greater_than(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2), self.peek(3)) {
            (Some(b'>'), Some(b'>'), Some(b'=')) => {
                self.take(4, SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken)
            }
            (Some(b'>'), Some(b'>'), _) => {
                self.take(3, SyntaxKind::GreaterThanGreaterThanGreaterThanToken)
            }
            (Some(b'>'), Some(b'='), _) => {
                self.take(3, SyntaxKind::GreaterThanGreaterThanEqualsToken)
            }
            (Some(b'>'), _, _) => self.take(2, SyntaxKind::GreaterThanGreaterThanToken),
            (Some(b'='), _, _) => self.take(2, SyntaxKind::GreaterThanEqualsToken),
            _ => self.take(1, SyntaxKind::GreaterThanToken),
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'='), Some(b'=')) => self.take(3, SyntaxKind::EqualsEqualsEqualsToken),
            (Some(b'='), _) => self.take(2, SyntaxKind::EqualsEqualsToken),
            _ => self.take(1, SyntaxKind::EqualsToken),
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'='), Some(b'=')) => self.take(3, SyntaxKind::ExclamationEqualsEqualsToken),
            (Some(b'='), _) => self.take(2, SyntaxKind::ExclamationEqualsToken),
            _ => self.take(1, SyntaxKind::ExclamationToken),
        }
    }

    fn scan_plus(&mut self) -> SyntaxKind {
        match self.peek(1) {
            Some(b'+') => self.take(2, SyntaxKind::PlusPlusToken),
            Some(b'=') => self.take(2, SyntaxKind::PlusEqualsToken),
            _ => self.take(1, SyntaxKind::PlusToken),
        }
    }

    fn scan_minus(&mut self) -> SyntaxKind {
        match self.peek(1) {
            Some(b'-') => self.take(2, SyntaxKind::MinusMinusToken),
            Some(b'=') => self.take(2, SyntaxKind::MinusEqualsToken),
            _ => self.take(1, SyntaxKind::MinusToken),
        }
    }

    fn scan_asterisk(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'*'), Some(b'=')) => self.take(3, SyntaxKind::AsteriskAsteriskEqualsToken),
            (Some(b'*'), _) => self.take(2, SyntaxKind::AsteriskAsteriskToken),
            (Some(b'='), _) => self.take(2, SyntaxKind::AsteriskEqualsToken),
            _ => self.take(1, SyntaxKind::AsteriskToken),
        }
    }

    fn scan_slash(&mut self) -> SyntaxKind {
        // Comments are consumed as trivia, so this is always division.
        match self.peek(1) {
            Some(b'=') => self.take(2, SyntaxKind::SlashEqualsToken),
            _ => self.take(1, SyntaxKind::SlashToken),
        }
    }

    fn scan_percent(&mut self) -> SyntaxKind {
        match self.peek(1) {
            Some(b'=') => self.take(2, SyntaxKind::PercentEqualsToken),
            _ => self.take(1, SyntaxKind::PercentToken),
        }
    }

    fn scan_ampersand(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'&'), Some(b'=')) => self.take(3, SyntaxKind::AmpersandAmpersandEqualsToken),
            (Some(b'&'), _) => self.take(2, SyntaxKind::AmpersandAmpersandToken),
            (Some(b'='), _) => self.take(2, SyntaxKind::AmpersandEqualsToken),
            _ => self.take(1, SyntaxKind::AmpersandToken),
        }
    }

    fn scan_bar(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'|'), Some(b'=')) => self.take(3, SyntaxKind::BarBarEqualsToken),
            (Some(b'|'), _) => self.take(2, SyntaxKind::BarBarToken),
            (Some(b'='), _) => self.take(2, SyntaxKind::BarEqualsToken),
            _ => self.take(1, SyntaxKind::BarToken),
        }
    }

    fn scan_caret(&mut self) -> SyntaxKind {
        match self.peek(1) {
            Some(b'=') => self.take(2, SyntaxKind::CaretEqualsToken),
            _ => self.take(1, SyntaxKind::CaretToken),
        }
    }

    // ========================================================================
    // Strings
    // ========================================================================

    fn scan_string_literal(&mut self, quote: u8) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1; // skip opening quote
        let mut result = String::new();
        let mut chunk_start = self.pos;
        loop {
            if self.is_eof() {
                result.push_str(&self.text[chunk_start..self.pos]);
                self.unterminated_string(start);
                break;
            }
            let b = self.bytes()[self.pos];
            if b == quote {
                result.push_str(&self.text[chunk_start..self.pos]);
                self.pos += 1;
                break;
            }
            if b == b'\\' {
                result.push_str(&self.text[chunk_start..self.pos]);
                self.scan_escape_sequence(&mut result);
                chunk_start = self.pos;
                continue;
            }
            if b == b'\r' || b == b'\n' {
                result.push_str(&self.text[chunk_start..self.pos]);
                self.unterminated_string(start);
                break;
            }
            // Continuation bytes of multi-byte characters never match the
            // ASCII checks above.
            self.pos += 1;
        }
        self.token_value = result;
        SyntaxKind::StringLiteral
    }

    fn unterminated_string(&mut self, start: usize) {
        self.token_flags |= TokenFlags::UNTERMINATED;
        self.error_at(start, self.pos - start, &messages::UNTERMINATED_STRING_LITERAL, &[]);
    }

    /// Scan an escape sequence starting at a backslash, appending its value.
    fn scan_escape_sequence(&mut self, out: &mut String) {
        self.pos += 1; // skip backslash
        let Some(ch) = self.current_char() else {
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            '0' if !self.peek(0).map_or(false, |b| b.is_ascii_digit()) => out.push('\0'),
            'b' => out.push('\u{8}'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'v' => out.push('\u{B}'),
            'f' => out.push('\u{C}'),
            'r' => out.push('\r'),
            'x' => match self.scan_hex_value(2, 2) {
                Some(value) => out.push(char::from_u32(value).unwrap_or('\u{FFFD}')),
                None => self.error_at(self.pos, 0, &messages::HEXADECIMAL_DIGIT_EXPECTED, &[]),
            },
            'u' if self.peek(0) == Some(b'{') => {
                self.pos += 1;
                let value = self.scan_hex_value(1, 6).filter(|v| *v <= 0x10FFFF);
                match value {
                    Some(value) if self.peek(0) == Some(b'}') => {
                        self.pos += 1;
                        out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
                    }
                    _ => self.error_at(self.pos, 0, &messages::HEXADECIMAL_DIGIT_EXPECTED, &[]),
                }
            }
            'u' => match self.scan_hex_value(4, 4) {
                Some(value) => out.push(char::from_u32(value).unwrap_or('\u{FFFD}')),
                None => self.error_at(self.pos, 0, &messages::HEXADECIMAL_DIGIT_EXPECTED, &[]),
            },
            // Line continuations contribute nothing.
            '\r' => {
                if self.peek(0) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {}
            other => out.push(other),
        }
    }

    /// Read between `min` and `max` hex digits. Returns `None` if fewer than
    /// `min` were present; the digits read are consumed either way.
    fn scan_hex_value(&mut self, min: usize, max: usize) -> Option<u32> {
        let mut value: u32 = 0;
        let mut count = 0;
        while count < max {
            match self.peek(0).and_then(|b| (b as char).to_digit(16)) {
                Some(digit) => {
                    value = value * 16 + digit;
                    self.pos += 1;
                    count += 1;
                }
                None => break,
            }
        }
        (count >= min).then_some(value)
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;

        if self.peek(0) == Some(b'0') {
            match self.peek(1) {
                Some(b'x') | Some(b'X') => {
                    return self.scan_radix_number(
                        start,
                        TokenFlags::HEX_SPECIFIER,
                        |b| is_hex_digit(b as char),
                        &messages::HEXADECIMAL_DIGIT_EXPECTED,
                    )
                }
                Some(b'b') | Some(b'B') => {
                    return self.scan_radix_number(
                        start,
                        TokenFlags::BINARY_SPECIFIER,
                        |b| is_binary_digit(b as char),
                        &messages::BINARY_DIGIT_EXPECTED,
                    )
                }
                Some(b'o') | Some(b'O') => {
                    return self.scan_radix_number(
                        start,
                        TokenFlags::OCTAL_SPECIFIER,
                        |b| is_octal_digit(b as char),
                        &messages::OCTAL_DIGIT_EXPECTED,
                    )
                }
                Some(b'0'..=b'9') => {
                    if let Some(kind) = self.try_scan_legacy_octal(start) {
                        return kind;
                    }
                }
                _ => {}
            }
        }

        // Decimal number
        if self.peek(0) != Some(b'.') {
            self.scan_digits(|b| b.is_ascii_digit());
        }
        if self.peek(0) == Some(b'.') {
            self.pos += 1;
            self.scan_digits(|b| b.is_ascii_digit());
        }

        // Exponent
        if let Some(b'e') | Some(b'E') = self.peek(0) {
            self.pos += 1;
            self.token_flags |= TokenFlags::SCIENTIFIC;
            if let Some(b'+') | Some(b'-') = self.peek(0) {
                self.pos += 1;
            }
            if !self.scan_digits(|b| b.is_ascii_digit()) {
                self.error_at(self.pos, 0, &messages::DIGIT_EXPECTED, &[]);
            }
        }

        self.finish_number(start)
    }

    /// `0` followed only by octal digits, e.g. `017`. Any 8 or 9 makes it a
    /// decimal literal with a leading zero instead.
    fn try_scan_legacy_octal(&mut self, start: usize) -> Option<SyntaxKind> {
        let digits_end = start
            + self.bytes()[start..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
        let digits = &self.bytes()[start..digits_end];
        if !digits.iter().all(|&b| is_octal_digit(b as char)) {
            return None;
        }
        if matches!(self.bytes().get(digits_end), Some(b'.') | Some(b'e') | Some(b'E') | Some(b'_')) {
            return None;
        }
        self.pos = digits_end;
        self.token_flags |= TokenFlags::OCTAL;
        Some(self.finish_number(start))
    }

    fn scan_radix_number(
        &mut self,
        start: usize,
        flag: TokenFlags,
        is_valid: fn(u8) -> bool,
        missing: &DiagnosticMessage,
    ) -> SyntaxKind {
        self.pos += 2; // skip 0x / 0b / 0o
        self.token_flags |= flag;
        if !self.scan_digits(is_valid) {
            self.error_at(self.pos, 0, missing, &[]);
        }
        self.finish_number(start)
    }

    fn finish_number(&mut self, start: usize) -> SyntaxKind {
        self.token_value = self.text[start..self.pos].to_string();
        self.check_for_identifier_after_number();
        SyntaxKind::NumericLiteral
    }

    /// Scan digits accepted by `is_valid`, with `_` separators between
    /// digits. Returns whether any digit was consumed.
    fn scan_digits(&mut self, is_valid: fn(u8) -> bool) -> bool {
        let mut any_digit = false;
        let mut allow_separator = false;
        let mut previous_was_separator = false;
        while let Some(b) = self.peek(0) {
            if b == b'_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                if allow_separator {
                    allow_separator = false;
                    previous_was_separator = true;
                } else if previous_was_separator {
                    self.error_at(
                        self.pos,
                        1,
                        &messages::MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS_ARE_NOT_PERMITTED,
                        &[],
                    );
                } else {
                    self.error_at(self.pos, 1, &messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[]);
                }
                self.pos += 1;
            } else if is_valid(b) {
                any_digit = true;
                allow_separator = true;
                previous_was_separator = false;
                self.pos += 1;
            } else {
                break;
            }
        }
        if previous_was_separator {
            self.error_at(self.pos - 1, 1, &messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[]);
        }
        any_digit
    }

    fn check_for_identifier_after_number(&mut self) {
        let Some(ch) = self.current_char() else {
            return;
        };
        if !is_identifier_start(ch) {
            return;
        }
        let rest = &self.text[self.pos..];
        let length: usize = rest
            .chars()
            .take_while(|&c| is_identifier_part(c))
            .map(char::len_utf8)
            .sum();
        self.error_at(
            self.pos,
            length,
            &messages::AN_IDENTIFIER_OR_KEYWORD_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL,
            &[],
        );
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(b) = self.peek(0) {
            if b.is_ascii() {
                if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' {
                    self.pos += 1;
                } else {
                    break;
                }
            } else {
                match self.current_char() {
                    Some(ch) if is_identifier_part(ch) => self.pos += ch.len_utf8(),
                    _ => break,
                }
            }
        }
        let text = &self.text[start..self.pos];
        self.token_value = text.to_string();
        SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier)
    }
}

// ============================================================================
// Free-standing entry points
// ============================================================================

/// Scan the single token that starts at `pos`, including its leading trivia.
///
/// Pure: the same text and position always give the same token.
pub fn scan_at(text: &str, pos: TextPos) -> TokenInfo {
    let mut scanner = Scanner::at(text, pos);
    scanner.scan();
    scanner.token_info()
}

/// Lazily tokenize `text`, skipping trivia. The sequence ends with exactly
/// one end-of-file token.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        scanner: Scanner::new(text),
        finished: false,
    }
}

/// Like [`tokenize`], but comments and whitespace are returned as tokens.
pub fn tokenize_with_trivia(text: &str) -> Tokens<'_> {
    Tokens {
        scanner: Scanner::with_trivia(text),
        finished: false,
    }
}

/// Iterator over the tokens of a text.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    scanner: Scanner<'a>,
    finished: bool,
}

impl<'a> Tokens<'a> {
    /// Lexical diagnostics reported so far.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        self.scanner.diagnostics()
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = TokenInfo;

    fn next(&mut self) -> Option<TokenInfo> {
        if self.finished {
            return None;
        }
        if self.scanner.scan() == SyntaxKind::EndOfFileToken {
            self.finished = true;
        }
        Some(self.scanner.token_info())
    }
}

impl FusedIterator for Tokens<'_> {}

/// Comments in the trivia that starts at `pos`.
pub fn leading_comment_ranges(text: &str, pos: TextPos) -> Vec<CommentRange> {
    let mut scanner = Scanner::at(text, pos);
    scanner.preserve_trivia = true;
    let mut comments: Vec<CommentRange> = Vec::new();
    loop {
        let kind = scanner.scan();
        match kind {
            SyntaxKind::SingleLineCommentTrivia
            | SyntaxKind::MultiLineCommentTrivia
            | SyntaxKind::ShebangTrivia => comments.push(CommentRange {
                kind,
                range: TextRange::new(scanner.token_start(), scanner.token_end()),
                has_trailing_new_line: false,
            }),
            SyntaxKind::NewLineTrivia => {
                if let Some(last) = comments.last_mut() {
                    if last.range.end == scanner.token_start() {
                        last.has_trailing_new_line = true;
                    }
                }
            }
            SyntaxKind::WhitespaceTrivia => {}
            _ => break,
        }
    }
    comments
}
