/// Sequential typed reader over a token stream

use crate::error::{AeroError, Result};
use crate::format::Token;
use crate::model::Table;

/// Cursor over a token sequence with typed read operations
///
/// Every `read_*` call consumes tokens and advances the cursor. Errors carry
/// the name of the section currently being read.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    tokens: Vec<Token<'a>>,
    offset: usize,
    section: &'static str,
}

impl<'a> TokenReader<'a> {
    /// Create a reader positioned at the first token
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self {
            tokens,
            offset: 0,
            section: "document",
        }
    }

    /// Current token offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of tokens in the stream
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if the stream holds no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Move the cursor to an absolute token offset
    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Name the section being read, for error context
    pub fn enter(&mut self, section: &'static str) {
        tracing::debug!(section, offset = self.offset, "reading section");
        self.section = section;
    }

    /// Source line of the current token, 0 past the end
    pub fn line(&self) -> usize {
        self.tokens.get(self.offset).map_or(0, |t| t.line)
    }

    /// Look at the current token without consuming it
    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.offset).map(|t| t.text)
    }

    fn next_token(&mut self) -> Result<Token<'a>> {
        let token = self
            .tokens
            .get(self.offset)
            .copied()
            .ok_or(AeroError::OutOfRange {
                offset: self.offset,
                len: self.tokens.len(),
                section: self.section,
            })?;
        self.offset += 1;
        Ok(token)
    }

    fn parse_number(&self, token: Token<'a>) -> Result<f64> {
        token.text.parse::<f64>().map_err(|_| {
            AeroError::format(
                token.line,
                self.offset - 1,
                self.section,
                format!("expected a number, found '{}'", token.text),
            )
        })
    }

    /// Read a token as text
    pub fn read_string(&mut self) -> Result<&'a str> {
        Ok(self.next_token()?.text)
    }

    /// Read a number as floating point
    pub fn read_float(&mut self) -> Result<f64> {
        let token = self.next_token()?;
        self.parse_number(token)
    }

    /// Read a number and truncate it to an integer (`3.0` reads as 3)
    pub fn read_int(&mut self) -> Result<i64> {
        let token = self.next_token()?;
        let value = self.parse_number(token)?;
        if !value.is_finite() {
            return Err(AeroError::format(
                token.line,
                self.offset - 1,
                self.section,
                format!("expected an integer, found '{}'", token.text),
            ));
        }
        Ok(value.trunc() as i64)
    }

    /// Read an element count; negative counts are rejected
    pub fn read_count(&mut self) -> Result<usize> {
        let line = self.line();
        let value = self.read_int()?;
        usize::try_from(value).map_err(|_| {
            AeroError::format(
                line,
                self.offset - 1,
                self.section,
                format!("negative count {}", value),
            )
        })
    }

    /// Read a count N followed by N floats
    pub fn read_array(&mut self) -> Result<Vec<f64>> {
        let count = self.read_count()?;
        (0..count).map(|_| self.read_float()).collect()
    }

    /// Read a row-major table, optionally preceded by a multiplier
    ///
    /// Returns the multiplier (1.0 when none is read) and `rows` rows of
    /// `cols` values each.
    pub fn read_table(
        &mut self,
        rows: usize,
        cols: usize,
        with_multiplier: bool,
    ) -> Result<(f64, Table)> {
        let multiplier = if with_multiplier {
            self.read_float()?
        } else {
            1.0
        };

        let mut table = Vec::with_capacity(rows);
        for _ in 0..rows {
            let row = (0..cols)
                .map(|_| self.read_float())
                .collect::<Result<Vec<f64>>>()?;
            table.push(row);
        }

        Ok((multiplier, table))
    }
}
