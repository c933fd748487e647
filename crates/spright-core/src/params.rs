//! Parameter list codec.
//!
//! Every configuration line is `definition parameter*`. Parameters are separated by runs of
//! whitespace; a `"` or `'` opens a quoted run that is closed by the same character. Quotes are
//! stripped on parse, and adjacent runs concatenate (`"a b"'c'` is the single value `a bc`).
//!
//! [`format_parameters`] is the inverse: for every list whose values contain no `'\n'`,
//! `parse_parameters(&format_parameters(&list)) == list`.

/// A single (unquoted) parameter value.
pub type Parameter = String;

/// The ordered parameters of a line.
pub type ParameterList = Vec<Parameter>;

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Split a parameter list into its tokens, stripping quotes.
///
/// This never fails: an unterminated quote simply extends to the end of `text`.
pub fn parse_parameters(text: &str) -> ParameterList {
    let mut parameters = ParameterList::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in text.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c.is_whitespace() => {
                if in_token {
                    parameters.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None if is_quote(c) => {
                quote = Some(c);
                in_token = true;
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        parameters.push(current);
    }
    parameters
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty() || value.starts_with('#') || value.chars().any(|c| c.is_whitespace() || is_quote(c))
}

/// Quote `value` if it would not survive [`parse_parameters`] unquoted.
///
/// Double quotes are preferred; single quotes are used when the value contains a `"`.
/// A value containing both quote characters is written as concatenated quoted runs.
pub fn conditionally_quote(value: &str) -> String {
    if !needs_quotes(value) {
        return value.to_string();
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    if !value.contains('\'') {
        return format!("'{value}'");
    }

    let mut out = String::with_capacity(value.len() + 4);
    let mut open: Option<char> = None;
    for c in value.chars() {
        let required = match c {
            '"' => '\'',
            '\'' => '"',
            _ => open.unwrap_or('"'),
        };
        if open != Some(required) {
            if let Some(q) = open {
                out.push(q);
            }
            out.push(required);
            open = Some(required);
        }
        out.push(c);
    }
    if let Some(q) = open {
        out.push(q);
    }
    out
}

/// Remove one pair of matching surrounding quotes, if present.
pub fn strip_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if is_quote(first) && first == last => &text[1..text.len() - 1],
        _ => text,
    }
}

/// Join parameters with single spaces, quoting where required.
pub fn format_parameters<S: AsRef<str>>(parameters: &[S]) -> String {
    parameters
        .iter()
        .map(|p| conditionally_quote(p.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split `text` at the first unquoted `#` that starts a token.
///
/// Returns the parameter part (with trailing whitespace removed) and the comment, including
/// its `#`.
pub fn split_trailing_comment(text: &str) -> (&str, Option<&str>) {
    let mut quote: Option<char> = None;
    let mut at_token_start = true;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '#' && at_token_start => {
                return (text[..i].trim_end(), Some(&text[i..]));
            }
            None if is_quote(c) => quote = Some(c),
            None => {}
        }
        at_token_start = quote.is_none() && c.is_whitespace();
    }
    (text, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_quotes_use_concatenated_runs() {
        let quoted = conditionally_quote(r#"say "it's""#);
        assert_eq!(parse_parameters(&quoted), vec![r#"say "it's""#.to_string()]);
    }

    #[test]
    fn test_comment_must_start_a_token() {
        assert_eq!(split_trailing_comment("a#b c"), ("a#b c", None));
        assert_eq!(split_trailing_comment("a \"#b\" # c"), ("a \"#b\"", Some("# c")));
        assert_eq!(split_trailing_comment("# only"), ("", Some("# only")));
    }
}
