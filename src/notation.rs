//! Text notation for trees
//!
//! `a(b(d,e),c)`: a value optionally followed by its children in
//! parentheses, separated by commas. Values are any text without `(`, `)` or
//! `,`, trimmed of surrounding whitespace. Blank input is the empty tree.
//!
//! Both directions are iterative, so tall trees parse and render without
//! deep recursion.

use std::fmt;

use crate::buffer::TreeBuffer;
use crate::traversal::{DepthFirst, UNBOUNDED};
use crate::tree::ArrayTree;
use crate::TreeError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Value(String),
    LParen,
    RParen,
    Comma,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    position: usize,
    kind: TokenKind,
}

struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn next_token(&mut self) -> Token {
        let rest = &self.input[self.position..];
        let trimmed = rest.trim_start();
        self.position += rest.len() - trimmed.len();
        let position = self.position;

        let kind = match trimmed.chars().next() {
            None => TokenKind::Eof,
            Some('(') => TokenKind::LParen,
            Some(')') => TokenKind::RParen,
            Some(',') => TokenKind::Comma,
            Some(_) => {
                let end = trimmed.find(['(', ')', ',']).unwrap_or(trimmed.len());
                self.position += end;
                return Token {
                    position,
                    kind: TokenKind::Value(trimmed[..end].trim_end().to_string()),
                };
            }
        };
        if kind != TokenKind::Eof {
            self.position += 1;
        }
        Token { position, kind }
    }
}

fn unexpected(token: &Token, expected: &str) -> TreeError {
    let found = match &token.kind {
        TokenKind::Value(value) => format!("value `{value}`"),
        TokenKind::LParen => "`(`".to_string(),
        TokenKind::RParen => "`)`".to_string(),
        TokenKind::Comma => "`,`".to_string(),
        TokenKind::Eof => "end of input".to_string(),
    };
    TreeError::Notation {
        position: token.position,
        message: format!("expected {expected}, found {found}"),
    }
}

/// Parse the text notation into a tree of strings
pub fn parse(input: &str) -> Result<ArrayTree<String>, TreeError> {
    let mut lexer = Lexer::new(input);
    let mut structure = Vec::new();
    let mut values = Vec::new();
    // Nodes whose `(` is still open, with the children seen so far
    let mut open: Vec<(String, usize)> = Vec::new();

    let first = lexer.next_token();
    let mut token = match first.kind {
        TokenKind::Eof => return Ok(ArrayTree::empty()),
        _ => first,
    };

    loop {
        // A value, then either its children or the end of the node
        let TokenKind::Value(value) = token.kind else {
            return Err(unexpected(&token, "a value"));
        };
        token = lexer.next_token();
        if token.kind == TokenKind::LParen {
            open.push((value, 0));
            token = lexer.next_token();
            continue;
        }
        structure.push(0);
        values.push(value);

        // Close finished nodes until another sibling follows
        loop {
            match token.kind {
                TokenKind::RParen => {
                    let Some((value, children)) = open.pop() else {
                        return Err(unexpected(&token, "end of input"));
                    };
                    structure.push(children + 1);
                    values.push(value);
                    token = lexer.next_token();
                }
                TokenKind::Comma if !open.is_empty() => {
                    if let Some((_, children)) = open.last_mut() {
                        *children += 1;
                    }
                    token = lexer.next_token();
                    break;
                }
                TokenKind::Eof if open.is_empty() => {
                    return ArrayTree::from_buffers(TreeBuffer::from_parts(structure, values)?);
                }
                _ if open.is_empty() => return Err(unexpected(&token, "end of input")),
                _ => return Err(unexpected(&token, "`,` or `)`")),
            }
        }
    }
}

/// Write the subtree rooted at the last slot in the text notation
pub(crate) fn write_tree<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    structure: &[usize],
    values: &[T],
) -> fmt::Result {
    let Some(root) = structure.len().checked_sub(1) else {
        return Ok(());
    };

    let mut previous = None;
    for (level, index) in DepthFirst::new(structure, root, UNBOUNDED) {
        match previous {
            Some(prev) if level > prev => f.write_str("(")?,
            Some(prev) => {
                for _ in level..prev {
                    f.write_str(")")?;
                }
                f.write_str(",")?;
            }
            None => {}
        }
        write!(f, "{}", values[index])?;
        previous = Some(level);
    }
    for _ in 0..previous.unwrap_or(0) {
        f.write_str(")")?;
    }
    Ok(())
}
