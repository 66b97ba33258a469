//! Interactive questions on the terminal.

use std::io::{BufRead, Write};

use crate::{Error, Result};

/// Asks `question` and returns the trimmed answer, which may be empty.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

/// Like [`ask`], but an empty answer (or end of input) yields `default`.
pub fn ask_or_default<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: &str,
) -> Result<String> {
    let answer = ask(input, output, question)?;
    if answer.is_empty() {
        return Ok(default.to_string());
    }
    Ok(answer)
}

/// Asks for a page count; empty means `default`, anything else must be a
/// non-negative integer.
pub fn ask_page_count<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: usize,
) -> Result<usize> {
    let answer = ask(input, output, question)?;
    if answer.is_empty() {
        return Ok(default);
    }
    answer.parse().map_err(|_| Error::InvalidPageCount(answer))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn answer_is_trimmed_and_question_printed() {
        let mut input = Cursor::new("  rust book \n");
        let mut output = Vec::new();
        let answer = ask(&mut input, &mut output, "Enter search term: ").unwrap();
        assert_eq!(answer, "rust book");
        assert_eq!(output, b"Enter search term: ");
    }

    #[test]
    fn empty_answer_falls_back_to_default() {
        let mut output = Vec::new();
        let answer =
            ask_or_default(&mut Cursor::new("\n"), &mut output, "file: ", "links.txt").unwrap();
        assert_eq!(answer, "links.txt");

        let answer = ask_or_default(&mut Cursor::new(""), &mut output, "file: ", "eof.txt").unwrap();
        assert_eq!(answer, "eof.txt");
    }

    #[test]
    fn page_count_parsing() {
        let mut output = Vec::new();
        assert_eq!(ask_page_count(&mut Cursor::new("\n"), &mut output, "", 25).unwrap(), 25);
        assert_eq!(ask_page_count(&mut Cursor::new("4\n"), &mut output, "", 25).unwrap(), 4);
        let err = ask_page_count(&mut Cursor::new("four\n"), &mut output, "", 25).unwrap_err();
        assert!(matches!(err, Error::InvalidPageCount(s) if s == "four"));
    }
}
