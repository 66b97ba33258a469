//! File names for downloaded documents.
//!
//! The name is whatever follows the last `/` of the URL, percent-decoded.
//! It is not sanitized: a decoded `..` or a separator inside the segment is
//! used as is, and two URLs with the same final segment write to the same file.

use crate::{Error, Result};

/// `https://host/files/My%20Book.pdf` becomes `My Book.pdf`.
///
/// Query strings stay part of the name. Invalid UTF-8 after decoding is
/// replaced with `U+FFFD`.
pub fn filename_from_url(url: &str) -> Result<String> {
    let segment = url.rsplit('/').next().unwrap_or(url);
    let decoded = urlencoding::decode_binary(segment.as_bytes());
    let name = String::from_utf8_lossy(&decoded).into_owned();
    if name.is_empty() {
        return Err(Error::MissingFileName(url.to_string()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_escapes() {
        let name = filename_from_url("https://example.com/books/My%20Book.pdf").unwrap();
        assert_eq!(name, "My Book.pdf");
    }

    #[test]
    fn takes_only_the_last_segment() {
        let name = filename_from_url("http://127.0.0.1:3000/a/b/c/file.epub").unwrap();
        assert_eq!(name, "file.epub");
    }

    #[test]
    fn keeps_query_string() {
        let name = filename_from_url("https://example.com/get.php?md5=abc").unwrap();
        assert_eq!(name, "get.php?md5=abc");
    }

    #[test]
    fn decodes_multibyte_utf8() {
        let name = filename_from_url("https://example.com/%C5%A1ola.pdf").unwrap();
        assert_eq!(name, "šola.pdf");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let name = filename_from_url("https://example.com/bad%FF.pdf").unwrap();
        assert_eq!(name, "bad\u{FFFD}.pdf");
    }

    #[test]
    fn trailing_slash_has_no_name() {
        let err = filename_from_url("https://example.com/dir/").unwrap_err();
        assert!(matches!(err, Error::MissingFileName(_)));
    }
}
