use rand::Rng;
use spright_core::{conditionally_quote, format_parameters, parse_parameters, strip_quotes};

fn params(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_parse_splits_on_whitespace_runs() {
    assert_eq!(parse_parameters("  16 \t 16  "), params(&["16", "16"]));
    assert_eq!(parse_parameters(""), Vec::<String>::new());
    assert_eq!(parse_parameters("   "), Vec::<String>::new());
}

#[test]
fn test_parse_strips_quotes() {
    assert_eq!(
        parse_parameters(r#""my file.png" 'it"s' plain"#),
        params(&["my file.png", r#"it"s"#, "plain"])
    );
}

#[test]
fn test_parse_concatenates_adjacent_runs() {
    assert_eq!(parse_parameters(r#"a"b c"'d'"#), params(&["ab cd"]));
    assert_eq!(parse_parameters(r#""" x"#), params(&["", "x"]));
}

#[test]
fn test_parse_unterminated_quote_runs_to_end() {
    assert_eq!(parse_parameters(r#"a "b c"#), params(&["a", "b c"]));
}

#[test]
fn test_format_quotes_only_when_needed() {
    assert_eq!(format_parameters(&["16", "16"]), "16 16");
    assert_eq!(format_parameters(&["a b.png"]), r#""a b.png""#);
    assert_eq!(format_parameters(&[r#"say "hi""#]), r#"'say "hi"'"#);
    assert_eq!(format_parameters(&[""]), r#""""#);
    assert_eq!(format_parameters(&["#tag"]), r##""#tag""##);
    assert_eq!(format_parameters::<&str>(&[]), "");
}

#[test]
fn test_conditionally_quote_and_strip() {
    assert_eq!(conditionally_quote("hero"), "hero");
    assert_eq!(conditionally_quote("hero idle"), "\"hero idle\"");
    assert_eq!(strip_quotes("\"hero idle\""), "hero idle");
    assert_eq!(strip_quotes("'x'"), "x");
    assert_eq!(strip_quotes("\"x'"), "\"x'");
    assert_eq!(strip_quotes("\""), "\"");
    assert_eq!(strip_quotes("plain"), "plain");
}

#[test]
fn test_random_parameter_lists_round_trip() {
    const ALPHABET: &[char] = &['a', 'Z', '0', '-', '.', ' ', '\t', '"', '\'', '#', 'é', '→'];
    let mut rng = rand::thread_rng();

    for _ in 0..2000 {
        let count = rng.gen_range(0..5);
        let list: Vec<String> = (0..count)
            .map(|_| {
                let len = rng.gen_range(0..8);
                (0..len)
                    .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
                    .collect()
            })
            .collect();

        let formatted = format_parameters(&list);
        assert_eq!(
            parse_parameters(&formatted),
            list,
            "round trip failed for {formatted:?}"
        );
    }
}
