//! string utilities

#[doc(inline)]
pub use ::smol_str;

/// Iterate over the lines of `s`, keeping empty trailing segments.
///
/// Lines are terminated by `\r\n`, `\r` or `\n`, the line breaks
/// of `text/event-stream`. Unlike [`str::lines`] a trailing line break
/// produces a final empty line, so that every line break in the input
/// maps to exactly one line break in the output.
pub fn split_lines(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(s);
    std::iter::from_fn(move || {
        let s = rest?;
        match s.find(['\r', '\n']) {
            Some(index) => {
                let terminator = if s[index..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&s[index + terminator..]);
                Some(&s[..index])
            }
            None => {
                rest = None;
                Some(s)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        let test_cases: [(&str, &[&str]); 11] = [
            ("", &[""]),
            ("a", &["a"]),
            ("a\nb", &["a", "b"]),
            ("a\r\nb", &["a", "b"]),
            ("a\rb", &["a", "b"]),
            ("a\r\r\nb", &["a", "", "b"]),
            ("a\n\rb", &["a", "", "b"]),
            ("a\n", &["a", ""]),
            ("a\r", &["a", ""]),
            ("\n\n", &["", "", ""]),
            ("\r\n\r\n", &["", "", ""]),
        ];
        for (input, expected) in test_cases {
            let lines: Vec<_> = split_lines(input).collect();
            assert_eq!(lines, expected, "input: {input:?}");
        }
    }
}
