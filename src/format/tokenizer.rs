/// Comment stripping and whitespace tokenization

use crate::format::constants::COMMENT_CHAR;

/// A whitespace-delimited token with the source line it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token text, never empty
    pub text: &'a str,
    /// 1-based source line
    pub line: usize,
}

/// Split a document into tokens
///
/// Lines starting with `#` are dropped; on other lines everything from the
/// first `#` onwards is dropped. The remainder is split on runs of spaces and
/// tabs. Both `\n` and `\r\n` line endings are accepted.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.starts_with(COMMENT_CHAR) {
            continue;
        }

        let content = match line.find(COMMENT_CHAR) {
            Some(pos) => &line[..pos],
            None => line,
        };

        tokens.extend(
            content
                .split(|c: char| c == ' ' || c == '\t')
                .filter(|t| !t.is_empty())
                .map(|text| Token {
                    text,
                    line: index + 1,
                }),
        );
    }

    tokens
}
