//! Order code generation.
//!
//! Codes look like `DH26K3N7Q`: the fixed `DH` prefix, the 2-digit year, and
//! five random characters from a restricted charset. The charset drops glyphs
//! that are easy to confuse when read aloud or copied by hand (`5`/`S` and
//! `8`/`B` collisions), so codes survive phone calls and handwriting.

use chrono::{Datelike, Utc};
use rand::Rng;

/// Fixed prefix of every order code.
pub const CODE_PREFIX: &str = "DH";

/// Number of random characters after the prefix and year.
pub const CODE_SUFFIX_LEN: usize = 5;

/// Visually unambiguous characters usable in an order code.
pub const CODE_CHARSET: &[u8] = b"01234679ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generates a fresh order code.
///
/// Called exactly once per order, at creation. The code is never regenerated
/// afterwards, updates included.
pub fn generate_order_code() -> String {
    let mut rng = rand::thread_rng();
    let year = Utc::now().year() % 100;

    let mut code = String::with_capacity(CODE_PREFIX.len() + 2 + CODE_SUFFIX_LEN);
    code.push_str(CODE_PREFIX);
    code.push_str(&format!("{year:02}"));
    for _ in 0..CODE_SUFFIX_LEN {
        let idx = rng.gen_range(0..CODE_CHARSET.len());
        code.push(char::from(CODE_CHARSET[idx]));
    }
    code
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_code_format() {
        let code = generate_order_code();
        assert_eq!(code.len(), CODE_PREFIX.len() + 2 + CODE_SUFFIX_LEN);
        assert!(code.starts_with(CODE_PREFIX));

        let year_part = &code[2..4];
        assert!(year_part.chars().all(|c| c.is_ascii_digit()));

        let suffix = &code[4..];
        assert!(suffix.bytes().all(|b| CODE_CHARSET.contains(&b)));
    }

    #[test]
    fn test_charset_excludes_ambiguous_glyphs() {
        for ambiguous in [b'5', b'8'] {
            assert!(!CODE_CHARSET.contains(&ambiguous));
        }
    }

    #[test]
    fn test_codes_vary() {
        let codes: std::collections::HashSet<String> =
            (0..32).map(|_| generate_order_code()).collect();
        assert!(codes.len() > 1);
    }
}
