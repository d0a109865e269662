// posix-style word splitting:
// '...' is literal, "..." only unescapes \" and \\, a bare backslash takes
// the next char as is, and touching pieces join into one word
use std::iter::Peekable;
use std::str::Chars;

use crate::error::{Result, ShellError};

/// Split `line` into words. Blank input gives an empty vec.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    Tokenizer::new(line).tokenize()
}

// only what IFS splits on, so e.g. a no-break space stays inside a word
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        while let Some(word) = self.next_word()? {
            tokens.push(word);
        }
        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|&c| is_separator(c)).is_some() {}
    }

    // None once the input is used up
    fn next_word(&mut self) -> Result<Option<String>> {
        self.skip_whitespace();
        if self.chars.peek().is_none() {
            return Ok(None);
        }

        let mut word = String::new();
        while let Some(&c) = self.chars.peek() {
            if is_separator(c) {
                break;
            }
            self.chars.next();
            match c {
                '\'' => self.read_single_quoted(&mut word)?,
                '"' => self.read_double_quoted(&mut word)?,
                '\\' => match self.chars.next() {
                    Some(escaped) => word.push(escaped),
                    None => return Err(ShellError::malformed("trailing backslash")),
                },
                _ => word.push(c),
            }
        }
        Ok(Some(word))
    }

    // opening quote already consumed
    fn read_single_quoted(&mut self, word: &mut String) -> Result<()> {
        for c in self.chars.by_ref() {
            if c == '\'' {
                return Ok(());
            }
            word.push(c);
        }
        Err(ShellError::malformed("unterminated single quote"))
    }

    fn read_double_quoted(&mut self, word: &mut String) -> Result<()> {
        while let Some(c) = self.chars.next() {
            match c {
                '"' => return Ok(()),
                '\\' => match self.chars.peek() {
                    Some(&next @ ('"' | '\\')) => {
                        self.chars.next();
                        word.push(next);
                    }
                    // any other backslash stays as written
                    _ => word.push('\\'),
                },
                _ => word.push(c),
            }
        }
        Err(ShellError::malformed("unterminated double quote"))
    }
}
