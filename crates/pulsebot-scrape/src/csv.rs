//! Minimal CSV reading — comma separation with double-quoted fields.
//!
//! The sheet exports never use embedded newlines, so records are split on
//! line boundaries first and fields within a line here.

/// Split one CSV record into fields, honoring quoted fields and the
/// `""` escape inside them.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parse a CSV document into rows of fields, skipping blank lines.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(split_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain() {
        assert_eq!(split_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_quoted_comma() {
        assert_eq!(split_line(r#"a,"1,234",c"#), vec!["a", "1,234", "c"]);
    }

    #[test]
    fn test_split_escaped_quote() {
        assert_eq!(split_line(r#""he said ""hi""",x"#), vec![r#"he said "hi""#, "x"]);
    }

    #[test]
    fn test_split_empty_fields() {
        assert_eq!(split_line("a,,c,"), vec!["a", "", "c", ""]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let rows = parse("a,b\n\nc,d\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }
}
