//! Helpers for building SQL text in certain shapes and patterns.

use super::ast::{Connective, Fragment};

// Quoting //

/// Quote an identifier with double quotes.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Quote a string literal with single quotes.
pub fn quote_literal(literal: &str) -> String {
    format!("'{}'", literal.replace('\'', "''"))
}

/// A comma separated list of quoted literals, e.g. `'a', 'b'`.
pub fn literal_list<I, S>(literals: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    literals
        .into_iter()
        .map(|literal| quote_literal(literal.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

// Composition //

/// Join predicates with a single connective, e.g. `a OR b OR c`.
/// No predicates produce an empty string.
pub fn join<I, S>(connective: Connective, predicates: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let separator = format!(" {} ", connective.keyword());
    predicates
        .into_iter()
        .filter(|predicate| !predicate.as_ref().is_empty())
        .map(|predicate| predicate.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Combine sibling fragments, each attached with its own connective.
///
/// Empty fragments are skipped together with their connective, so the result never
/// contains a dangling `AND`/`OR` or an empty `()`. The connective of the first
/// rendered fragment is not emitted.
pub fn combine(fragments: &[Fragment]) -> String {
    let mut sql = String::new();
    for fragment in fragments.iter().filter(|fragment| !fragment.is_empty()) {
        if !sql.is_empty() {
            sql.push(' ');
            sql.push_str(fragment.connective.keyword());
            sql.push(' ');
        }
        sql.push_str(&fragment.sql);
    }
    sql
}

// Predicates //

/// Fetch a key out of an hstore column: `("tags" -> 'hashtags')`.
pub fn hstore_get(column: &str, key: &str) -> String {
    format!("({} -> {})", quote_identifier(column), quote_literal(key))
}

/// A LIKE match using the postgres operator form: `<expression> ~~ '<pattern>'`.
pub fn like(expression: &str, pattern: &str) -> String {
    format!("{expression} ~~ {}", quote_literal(pattern))
}

/// Array membership of a literal: `'<literal>'=ANY(<column>)`.
pub fn any_of(literal: &str, array_column: &str) -> String {
    format!("{}=ANY({array_column})", quote_literal(literal))
}

/// Equality of a literal with a column: `'<literal>'=<column>`.
pub fn literal_equals(literal: &str, column: &str) -> String {
    format!("{}={column}", quote_literal(literal))
}

/// `<column> in ('a', 'b')`.
pub fn in_list<I, S>(column: &str, literals: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    format!("{column} in ({})", literal_list(literals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_skips_empty_predicates() {
        assert_eq!(join(Connective::Or, ["a", "", "b"]), "a OR b");
        assert_eq!(join(Connective::Or, Vec::<String>::new()), "");
    }

    #[test]
    fn combine_drops_empty_fragments_and_their_connective() {
        let fragments = [
            Fragment::and("x = 1"),
            Fragment::and(""),
            Fragment::or("y = 2"),
        ];
        assert_eq!(combine(&fragments), "x = 1 OR y = 2");

        let leading_empty = [Fragment::and(""), Fragment::and("z = 3")];
        assert_eq!(combine(&leading_empty), "z = 3");

        assert_eq!(combine(&[Fragment::and("")]), "");
    }

    #[test]
    fn parenthesized_empty_fragment_stays_empty() {
        assert!(Fragment::and("").parenthesized().is_empty());
        assert_eq!(Fragment::and("a OR b").parenthesized().sql, "(a OR b)");
    }

    #[test]
    fn predicate_shapes() {
        assert_eq!(
            like(&hstore_get("tags", "hashtags"), "%hotosm-project-1;%"),
            "(\"tags\" -> 'hashtags') ~~ '%hotosm-project-1;%'"
        );
        assert_eq!(any_of("badgeom", "status"), "'badgeom'=ANY(status)");
        assert_eq!(
            literal_equals("MANUEL_PC", "username"),
            "'MANUEL_PC'=username"
        );
        assert_eq!(
            in_list("unnest_status", ["badgeom", "badvalue"]),
            "unnest_status in ('badgeom', 'badvalue')"
        );
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(quote_literal("o'brien"), "'o''brien'");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
