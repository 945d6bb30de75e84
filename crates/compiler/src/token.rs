//! Condition string normalization and tokenization.
//!
//! A raw condition string is rewritten so that every relational literal
//! becomes a single token and the remaining tokens are exactly the boolean
//! keywords `and`, `or`, `(` and `)`:
//!
//! - parentheses are padded with spaces, whitespace runs collapse to one
//! - the multi-word operators fuse: `is not` -> `is_not`, `not in` -> `not_in`
//! - spacing around `>=`, `<=`, `>`, `<`, `=` is deleted, gluing each
//!   relational literal into one token
//! - over-split operands re-merge scanning right-to-left: `in`/`not_in`
//!   swallows its left operand through the closing parenthesis, `is`/`is_not`
//!   its two neighbors

use once_cell::sync::Lazy;
use parser::{ParseError, Result};
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static TIGHTEN: Lazy<[(Regex, &'static str); 5]> = Lazy::new(|| {
    [
        (Regex::new(r"\s*>=\s*").unwrap(), ">="),
        (Regex::new(r"\s*<=\s*").unwrap(), "<="),
        (Regex::new(r"\s*>\s*").unwrap(), ">"),
        (Regex::new(r"\s*<\s*").unwrap(), "<"),
        (Regex::new(r"\s*=\s*").unwrap(), "="),
    ]
});

fn unparsable(line: usize, text: &str, reason: &str) -> ParseError {
    ParseError::UnparsableCondition {
        line,
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

/// Tokenize a condition string into literal tokens and boolean keywords.
pub(crate) fn tokenize(text: &str, line: usize) -> Result<Vec<String>> {
    let padded = text.replace('(', " ( ").replace(')', " ) ");
    let collapsed = WHITESPACE.replace_all(padded.trim(), " ").to_string();
    let fused = collapsed
        .replace("is not", "is_not")
        .replace("not in", "not_in");

    let mut tight = fused;
    for (pattern, replacement) in TIGHTEN.iter() {
        tight = pattern.replace_all(&tight, *replacement).to_string();
    }

    let mut tokens: Vec<String> = tight.split(' ').map(String::from).collect();

    // Re-merge operands that the spacing pass split apart, scanning
    // right-to-left so each merge leaves earlier indices untouched.
    let mut i = tokens.len();
    while i > 0 {
        i -= 1;
        let span = match tokens[i].as_str() {
            "in" | "not_in" => {
                if i == 0 {
                    return Err(unparsable(line, text, "dangling `in` operator"));
                }
                let close = tokens[i..]
                    .iter()
                    .position(|t| t == ")")
                    .map(|p| p + i)
                    .ok_or_else(|| {
                        unparsable(line, text, "missing closing parenthesis after `in`")
                    })?;
                Some((i - 1, close))
            }
            "is" | "is_not" => {
                if i == 0 || i + 1 >= tokens.len() {
                    return Err(unparsable(line, text, "dangling `is` operator"));
                }
                Some((i - 1, i + 1))
            }
            _ => None,
        };
        if let Some((start, end)) = span {
            let merged = tokens[start..=end].join(" ");
            tokens.splice(start..=end, [merged]);
            i = start;
        }
    }

    // Compress the bracketed member list inside merged `in` literals.
    for token in &mut tokens {
        if token.contains('(') && token.contains(')') {
            *token = token.replace("( ", "(").replace(", ", ",").replace(" )", ")");
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        tokenize(text, 1).expect("tokenizable condition")
    }

    #[test]
    fn relational_literals_become_single_tokens() {
        assert_eq!(tokens("A.grade > 5"), ["A.grade>5"]);
        assert_eq!(tokens("A.grade<=4"), ["A.grade<=4"]);
        assert_eq!(
            tokens("A.grade = 3 and B.mark >= 2"),
            ["A.grade=3", "and", "B.mark>=2"]
        );
    }

    #[test]
    fn is_not_fuses_and_remerges() {
        assert_eq!(tokens("A.name is not y"), ["A.name is_not y"]);
        assert_eq!(
            tokens("A.grade <= 4 and A.name is y"),
            ["A.grade<=4", "and", "A.name is y"]
        );
    }

    #[test]
    fn in_lists_remerge_and_compress() {
        assert_eq!(tokens("A.name in (x, y)"), ["A.name in (x,y)"]);
        assert_eq!(
            tokens("A.grade > 2 and A.name not in (x, y, z)"),
            ["A.grade>2", "and", "A.name not_in (x,y,z)"]
        );
    }

    #[test]
    fn boolean_structure_survives() {
        assert_eq!(
            tokens("(A.grade = 3 or A.grade = 4) and A.name is x"),
            ["(", "A.grade=3", "or", "A.grade=4", ")", "and", "A.name is x"]
        );
    }

    #[test]
    fn dangling_operators_are_rejected() {
        assert!(tokenize("is not y", 1).is_err());
        assert!(tokenize("A.name in (x, y", 1).is_err());
    }
}
