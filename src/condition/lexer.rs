// SPDX-License-Identifier: MIT

//! Tokenizer for condition expressions

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::CharIndices;

use super::ast::ContextKey;
use crate::error::SyntaxError;
use crate::tracker::Stat;

/// Reserved words, matched case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Stat(Stat),
    Context(ContextKey),
    Trait,
    True,
    False,
    And,
    Or,
    Not,
    In,
}

static KEYWORDS: Lazy<HashMap<&'static str, Keyword>> = Lazy::new(|| {
    HashMap::from([
        ("hp", Keyword::Stat(Stat::Hp)),
        ("atk", Keyword::Stat(Stat::Atk)),
        ("attack", Keyword::Stat(Stat::Atk)),
        ("def", Keyword::Stat(Stat::Def)),
        ("defense", Keyword::Stat(Stat::Def)),
        ("spa", Keyword::Stat(Stat::SpA)),
        ("spatk", Keyword::Stat(Stat::SpA)),
        ("spd", Keyword::Stat(Stat::SpD)),
        ("spdef", Keyword::Stat(Stat::SpD)),
        ("spe", Keyword::Stat(Stat::Spe)),
        ("speed", Keyword::Stat(Stat::Spe)),
        ("level", Keyword::Context(ContextKey::Level)),
        ("evolution", Keyword::Context(ContextKey::Evolution)),
        ("trait", Keyword::Trait),
        ("nature", Keyword::Trait),
        ("true", Keyword::True),
        ("false", Keyword::False),
        ("and", Keyword::And),
        ("or", Keyword::Or),
        ("not", Keyword::Not),
        ("in", Keyword::In),
    ])
});

/// Look up a reserved word
pub fn keyword(word: &str) -> Option<Keyword> {
    KEYWORDS.get(word.to_ascii_lowercase().as_str()).copied()
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Str(String),
    Ident(String),
    Keyword(Keyword),
    LParen,
    RParen,
    Bang,
    AndAnd,
    OrOr,
    EqEq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Eof,
}

/// A token and the byte offset it starts at
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl TokenKind {
    /// Human readable description for error messages
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(n) => format!("number {}", n),
            TokenKind::Str(s) => format!("string \"{}\"", s),
            TokenKind::Ident(name) => format!("identifier '{}'", name),
            TokenKind::Keyword(k) => format!("keyword '{}'", keyword_name(*k)),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Bang => "'!'".to_string(),
            TokenKind::AndAnd => "'&&'".to_string(),
            TokenKind::OrOr => "'||'".to_string(),
            TokenKind::EqEq => "'=='".to_string(),
            TokenKind::NotEq => "'!='".to_string(),
            TokenKind::Lt => "'<'".to_string(),
            TokenKind::Lte => "'<='".to_string(),
            TokenKind::Gt => "'>'".to_string(),
            TokenKind::Gte => "'>='".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

fn keyword_name(keyword: Keyword) -> String {
    match keyword {
        Keyword::Stat(stat) => stat.to_string(),
        Keyword::Context(key) => key.to_string(),
        Keyword::Trait => "trait".to_string(),
        Keyword::True => "true".to_string(),
        Keyword::False => "false".to_string(),
        Keyword::And => "and".to_string(),
        Keyword::Or => "or".to_string(),
        Keyword::Not => "not".to_string(),
        Keyword::In => "in".to_string(),
    }
}

/// Split a condition into tokens, ending with `Eof`
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer {
        source,
        chars: source.char_indices().peekable(),
    };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let Some((start, c)) = self.chars.next() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                position: self.source.len(),
            });
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '!' => self.pick('=', TokenKind::NotEq, TokenKind::Bang),
            '<' => self.pick('=', TokenKind::Lte, TokenKind::Lt),
            '>' => self.pick('=', TokenKind::Gte, TokenKind::Gt),
            '=' => self.require('=', start, TokenKind::EqEq, "'=' is not an operator, use '=='")?,
            '&' => self.require('&', start, TokenKind::AndAnd, "expected '&&'")?,
            '|' => self.require('|', start, TokenKind::OrOr, "expected '||'")?,
            '"' | '\'' => self.string(start, c)?,
            c if c.is_ascii_digit() => self.number(start)?,
            c if c.is_alphabetic() || c == '_' => self.word(start),
            other => {
                return Err(SyntaxError::new(
                    start,
                    format!("invalid character '{}'", other),
                ))
            }
        };

        Ok(Token {
            kind,
            position: start,
        })
    }

    /// Two-character operator if `next` follows, else the single one
    fn pick(&mut self, next: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.chars.next_if(|(_, c)| *c == next).is_some() {
            double
        } else {
            single
        }
    }

    fn require(
        &mut self,
        next: char,
        start: usize,
        kind: TokenKind,
        message: &str,
    ) -> Result<TokenKind, SyntaxError> {
        match self.chars.next_if(|(_, c)| *c == next) {
            Some(_) => Ok(kind),
            None => Err(SyntaxError::new(start, message)),
        }
    }

    fn string(&mut self, start: usize, quote: char) -> Result<TokenKind, SyntaxError> {
        let mut value = String::new();
        while let Some((pos, c)) = self.chars.next() {
            match c {
                c if c == quote => return Ok(TokenKind::Str(value)),
                '\\' => match self.chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, escaped @ ('\\' | '"' | '\''))) => value.push(escaped),
                    Some((_, other)) => {
                        return Err(SyntaxError::new(
                            pos,
                            format!("unknown escape sequence '\\{}'", other),
                        ))
                    }
                    None => break,
                },
                c => value.push(c),
            }
        }
        Err(SyntaxError::new(start, "unterminated string literal"))
    }

    fn number(&mut self, start: usize) -> Result<TokenKind, SyntaxError> {
        let mut end = start + 1;
        while let Some((pos, c)) = self.chars.next_if(|(_, c)| c.is_ascii_digit()) {
            end = pos + c.len_utf8();
        }
        if let Some((dot, _)) = self.chars.next_if(|(_, c)| *c == '.') {
            end = dot + 1;
            let mut fraction = false;
            while let Some((pos, c)) = self.chars.next_if(|(_, c)| c.is_ascii_digit()) {
                end = pos + c.len_utf8();
                fraction = true;
            }
            if !fraction {
                return Err(SyntaxError::new(
                    start,
                    format!("malformed number '{}'", &self.source[start..end]),
                ));
            }
        }
        let text = &self.source[start..end];
        text.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(TokenKind::Number)
            .ok_or_else(|| SyntaxError::new(start, format!("malformed number '{}'", text)))
    }

    fn word(&mut self, start: usize) -> TokenKind {
        let mut end = self.source.len();
        loop {
            match self.chars.peek() {
                Some((_, c)) if c.is_alphanumeric() || *c == '_' => {
                    self.chars.next();
                }
                Some((pos, _)) => {
                    end = *pos;
                    break;
                }
                None => break,
            }
        }
        let text = &self.source[start..end];
        match keyword(text) {
            Some(k) => TokenKind::Keyword(k),
            None => TokenKind::Ident(text.to_string()),
        }
    }
}
