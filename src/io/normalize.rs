//! Quoted-field pre-pass for the case CSV.
//!
//! The loader splits rows on plain commas. A handful of region names in the
//! source data are quoted because they contain a comma (`"Korea, South"`), so
//! before splitting we rewrite those quoted names into comma-free text.
//!
//! This is not a CSV parser. Only quoted runs made of ASCII letters, spaces and
//! commas are rewritten; a quoted field containing digits, other punctuation or
//! nested quotes is left exactly as it is (and will likely split into extra
//! columns, which the loader then reports as a column-count error).

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_QUOTED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([A-Za-z ,]+)""#).expect("quoted-name pattern is valid"));

static RE_COMMA_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r", *").expect("comma pattern is valid"));

/// Rewrite quoted place names so the line can be split on commas.
///
/// `"Hong Kong, SAR"` becomes `Hong KongSAR`: quotes are dropped and each comma
/// is deleted together with the spaces right after it. Lines without a quote
/// character are returned borrowed and unchanged.
pub fn normalize_line(line: &str) -> Cow<'_, str> {
    if !line.contains('"') {
        return Cow::Borrowed(line);
    }

    RE_QUOTED_NAME.replace_all(line, |caps: &Captures<'_>| {
        RE_COMMA_RUN.replace_all(&caps[1], "").into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquoted_lines_are_returned_unchanged() {
        let lines = [
            ",Italy,41.87,12.56,0,2,3",
            "",
            "Ontario,Canada,51.25,-85.32,0,",
            "Curaçao,Netherlands,12.17,-68.99,3,5",
            "Côte d'Ivoire, Réunion ,, ,1",
            "   ",
        ];
        for line in lines {
            let out = normalize_line(line);
            assert!(matches!(out, Cow::Borrowed(_)), "{line:?} was copied");
            assert_eq!(out, line);
        }
    }

    #[test]
    fn quoted_name_loses_quotes_and_comma() {
        let line = r#"Test,"New York, Test",40.7,-74.0,1,2"#;
        let out = normalize_line(line);
        assert!(out.contains("New YorkTest"));
        assert_eq!(out, "Test,New YorkTest,40.7,-74.0,1,2");
    }

    #[test]
    fn multiple_quoted_names_are_all_rewritten() {
        let line = r#""Bonaire, Sint Eustatius and Saba","Korea, South",0,0,5"#;
        assert_eq!(
            normalize_line(line),
            "BonaireSint Eustatius and Saba,KoreaSouth,0,0,5"
        );
    }

    #[test]
    fn quoted_field_with_digits_passes_through() {
        let line = r#""Zone 9, North",Country,0,0,1"#;
        assert_eq!(normalize_line(line), line);
    }

    #[test]
    fn quoted_name_without_comma_just_loses_quotes() {
        let line = r#""Reunion",France,0,0,1"#;
        assert_eq!(normalize_line(line), "Reunion,France,0,0,1");
    }
}
