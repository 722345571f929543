//! Text sanitization ahead of record parsing
//!
//! `git log` output can carry anything a committer typed: terminal escape
//! sequences, stray NULs, tabs, UTF-8 in any state of repair. The record
//! parser only has to cope with printable ASCII and line breaks.

/// Whether `c` survives sanitization.
///
/// Printable 7-bit ASCII (`' '..='~'`) plus `\n`. Tab is not kept.
pub fn is_kept(c: char) -> bool {
    c == '\n' || (' '..='~').contains(&c)
}

/// Drop every character outside printable ASCII and newline.
///
/// Control characters (0x00-0x1F except `\n`, 0x7F) and all non-ASCII
/// characters are removed, never replaced.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|&c| is_kept(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<String> {
        vec![
            String::new(),
            "plain text".to_string(),
            "tab\tseparated\tvalues".to_string(),
            "crlf line\r\nnext".to_string(),
            "\u{1b}[31mred\u{1b}[0m".to_string(),
            "nul\0byte and del\u{7f}".to_string(),
            "caf\u{e9} \u{2192} \u{1f680}".to_string(),
            "\u{fffd}lossy\u{fffd}".to_string(),
            (0u8..=127).map(char::from).collect(),
            "\u{d7ff}a\u{e000}b\u{fffe}\u{ffff}c\u{10000}d\u{10ffff}".to_string(),
            "\u{80}\u{9f}\u{a0}\u{ff}\u{100}\u{7ff}\u{800}".to_string(),
        ]
    }

    /// Every code point from U+0000 through U+00FF.
    fn latin1() -> impl Iterator<Item = char> {
        (0u8..=0xff).map(char::from)
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for sample in samples() {
            let once = sanitize(&sample);
            assert_eq!(sanitize(&once), once, "input: {:?}", sample);
        }
    }

    #[test]
    fn test_each_char_up_to_ff_follows_kept_class() {
        for c in latin1() {
            let expected = c == '\n' || (0x20..=0x7e).contains(&(c as u32));
            assert_eq!(is_kept(c), expected, "U+{:04X}", c as u32);

            let input = format!("x{}y", c);
            let once = sanitize(&input);
            let wanted = if expected { input.clone() } else { "xy".to_string() };
            assert_eq!(once, wanted, "U+{:04X}", c as u32);
            assert_eq!(sanitize(&once), once, "U+{:04X}", c as u32);
        }
    }

    #[test]
    fn test_sweep_up_to_ff_as_one_string() {
        let input: String = latin1().collect();
        let once = sanitize(&input);

        let expected: String = std::iter::once('\n').chain(' '..='~').collect();
        assert_eq!(once, expected);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_drops_multibyte_and_surrogate_neighbours() {
        let input = "\u{d7ff}a\u{e000}b\u{fffe}\u{ffff}c\u{10000}d\u{10ffff}";
        assert_eq!(sanitize(input), "abcd");
        for c in ['\u{d7ff}', '\u{e000}', '\u{ffff}', '\u{10000}', '\u{10ffff}'] {
            assert!(!is_kept(c), "U+{:04X}", c as u32);
        }
    }

    #[test]
    fn test_preserves_newlines_and_printable_ascii() {
        let text = "---\ncommit: \"abc\"\nmessage: |\n  foo: 1.0 -> 2.0 ~!@#$%^&*()";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_removes_every_control_character_except_newline() {
        for b in (0u8..0x20).chain(std::iter::once(0x7f)) {
            let c = char::from(b);
            let input = format!("a{}b", c);
            let expected = if c == '\n' { "a\nb" } else { "ab" };
            assert_eq!(sanitize(&input), expected, "byte 0x{:02x}", b);
        }
    }

    #[test]
    fn test_drops_tab() {
        assert_eq!(sanitize("foo:\t1.0"), "foo:1.0");
    }

    #[test]
    fn test_drops_non_ascii_without_transliteration() {
        assert_eq!(sanitize("na\u{ef}ve r\u{e9}sum\u{e9}"), "nave rsum");
        assert_eq!(sanitize("\u{1f680}\u{fffd}"), "");
    }

    #[test]
    fn test_output_contains_only_kept_chars() {
        for sample in samples() {
            assert!(sanitize(&sample).chars().all(is_kept));
        }
    }
}
