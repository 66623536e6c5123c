use crate::error::{Span, TickError};
use crate::token::{Token, TokenKind};

const DURATION_UNITS: &[&str] = &["u", "µ", "us", "µs", "ms", "s", "m", "h", "d", "w"];

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, TickError> {
        loop {
            self.skip_trivia();
            let span = self.span();
            let Some(c) = self.peek() else {
                self.tokens.push(Token {
                    kind: TokenKind::Eof,
                    span,
                });
                return Ok(self.tokens);
            };

            let kind = match c {
                '\'' => self.string()?,
                '"' => TokenKind::Reference(self.quoted('"')?),
                '/' if self.expects_regex() => self.regex()?,
                c if c.is_ascii_digit() => self.number()?,
                c if c.is_alphabetic() || c == '_' => self.word(),
                _ => self.operator()?,
            };
            self.tokens.push(Token { kind, span });
        }
    }

    fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, span: Span, message: impl Into<String>) -> TickError {
        TickError::Lex {
            span,
            message: message.into(),
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '/' && self.peek_at(1) == Some('/') {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn expects_regex(&self) -> bool {
        matches!(
            self.tokens.last().map(|t| &t.kind),
            Some(TokenKind::RegexEq | TokenKind::RegexNotEq)
        )
    }

    fn string(&mut self) -> Result<TokenKind, TickError> {
        if self.peek_at(1) == Some('\'') && self.peek_at(2) == Some('\'') {
            let start = self.span();
            for _ in 0..3 {
                self.bump();
            }
            let mut value = String::new();
            loop {
                match self.peek() {
                    None => return Err(self.error(start, "unterminated triple-quoted string")),
                    Some('\'') if self.peek_at(1) == Some('\'') && self.peek_at(2) == Some('\'') => {
                        for _ in 0..3 {
                            self.bump();
                        }
                        return Ok(TokenKind::Str {
                            value,
                            triple: true,
                        });
                    }
                    Some(c) => {
                        value.push(c);
                        self.bump();
                    }
                }
            }
        }
        let value = self.quoted('\'')?;
        Ok(TokenKind::Str {
            value,
            triple: false,
        })
    }

    // Only an escaped delimiter is unescaped; every other backslash is literal.
    fn quoted(&mut self, delim: char) -> Result<String, TickError> {
        let start = self.span();
        self.bump();
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error(start, "unterminated quoted literal")),
                Some('\\') if self.peek_at(1) == Some(delim) => {
                    self.bump();
                    self.bump();
                    value.push(delim);
                }
                Some(c) if c == delim => {
                    self.bump();
                    return Ok(value);
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    fn regex(&mut self) -> Result<TokenKind, TickError> {
        let start = self.span();
        self.bump();
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => return Err(self.error(start, "unterminated regex")),
                Some('\\') if self.peek_at(1) == Some('/') => {
                    self.bump();
                    self.bump();
                    value.push_str("\\/");
                }
                Some('/') => {
                    self.bump();
                    return Ok(TokenKind::Regex(value));
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    fn number(&mut self) -> Result<TokenKind, TickError> {
        let start = self.span();
        let mut text = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            text.push(c);
            self.bump();
        }
        let mut is_float = false;
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            text.push('.');
            self.bump();
            while let Some(c) = self.peek().filter(char::is_ascii_digit) {
                text.push(c);
                self.bump();
            }
        }

        let mut unit = String::new();
        while let Some(c) = self.peek().filter(|c| c.is_alphanumeric() || *c == '_') {
            unit.push(c);
            self.bump();
        }
        if unit.is_empty() {
            return Ok(TokenKind::Number(text));
        }
        if is_float || !DURATION_UNITS.contains(&unit.as_str()) {
            return Err(self.error(start, format!("invalid duration or number {text}{unit}")));
        }
        text.push_str(&unit);
        Ok(TokenKind::Duration(text))
    }

    fn word(&mut self) -> TokenKind {
        let mut word = String::new();
        while let Some(c) = self.peek().filter(|c| c.is_alphanumeric() || *c == '_') {
            word.push(c);
            self.bump();
        }
        match word.as_str() {
            "var" => TokenKind::Var,
            "TRUE" => TokenKind::True,
            "FALSE" => TokenKind::False,
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "dbrp" => TokenKind::Dbrp,
            "lambda" if self.peek() == Some(':') => {
                self.bump();
                TokenKind::Lambda
            }
            _ => TokenKind::Ident(word),
        }
    }

    fn operator(&mut self) -> Result<TokenKind, TickError> {
        let start = self.span();
        let Some(c) = self.bump() else {
            return Err(self.error(start, "unexpected end of script"));
        };
        let next = self.peek();
        let kind = match (c, next) {
            ('=', Some('=')) => self.two(TokenKind::Eq),
            ('=', Some('~')) => self.two(TokenKind::RegexEq),
            ('=', _) => TokenKind::Assign,
            ('!', Some('=')) => self.two(TokenKind::NotEq),
            ('!', Some('~')) => self.two(TokenKind::RegexNotEq),
            ('!', _) => TokenKind::Not,
            ('<', Some('=')) => self.two(TokenKind::LtEq),
            ('<', _) => TokenKind::Lt,
            ('>', Some('=')) => self.two(TokenKind::GtEq),
            ('>', _) => TokenKind::Gt,
            ('+', _) => TokenKind::Plus,
            ('-', _) => TokenKind::Minus,
            ('*', _) => TokenKind::Star,
            ('/', _) => TokenKind::Slash,
            ('%', _) => TokenKind::Percent,
            ('|', _) => TokenKind::Pipe,
            ('.', _) => TokenKind::Dot,
            ('@', _) => TokenKind::At,
            (',', _) => TokenKind::Comma,
            ('(', _) => TokenKind::LParen,
            (')', _) => TokenKind::RParen,
            ('[', _) => TokenKind::LBracket,
            (']', _) => TokenKind::RBracket,
            (other, _) => return Err(self.error(start, format!("unexpected character {other:?}"))),
        };
        Ok(kind)
    }

    fn two(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, TickError> {
    Lexer::new(source).tokenize()
}
