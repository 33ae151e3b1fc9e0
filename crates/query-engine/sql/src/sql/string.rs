//! Type definitions of a low-level SQL string representation.

use super::helpers;

/// A SQL statement under construction.
///
/// Values are interpolated as quoted literals rather than bound as parameters: the
/// generated text is compared byte-for-byte against reference statements, so the
/// layout (indentation, newlines, spacing) of everything appended here is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SQL {
    pub sql: String,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new()
    }
}

impl SQL {
    pub fn new() -> SQL {
        SQL { sql: String::new() }
    }

    /// Append raw syntax.
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Start a new line and append raw syntax to it.
    pub fn append_line(&mut self, sql: &str) {
        self.sql.push('\n');
        self.sql.push_str(sql);
    }

    /// Append a double-quoted identifier.
    pub fn append_identifier(&mut self, identifier: &str) {
        self.sql.push_str(&helpers::quote_identifier(identifier));
    }

    /// Append a single-quoted string literal.
    pub fn append_literal(&mut self, literal: &str) {
        self.sql.push_str(&helpers::quote_literal(literal));
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn into_string(self) -> String {
        self.sql
    }
}

impl From<SQL> for String {
    fn from(sql: SQL) -> Self {
        sql.sql
    }
}

impl std::fmt::Display for SQL {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::SQL;

    #[test]
    fn lines_are_prefixed_with_a_newline() {
        let mut sql = SQL::new();
        sql.append_syntax("   with t1 as (");
        sql.append_line("        select id");
        sql.append_line("        ");
        assert_eq!(sql.sql, "   with t1 as (\n        select id\n        ");
    }

    #[test]
    fn literals_and_identifiers_are_quoted() {
        let mut sql = SQL::new();
        sql.append_identifier("created_at");
        sql.append_syntax(" = ");
        sql.append_literal("it's");
        assert_eq!(sql.to_string(), "\"created_at\" = 'it''s'");
    }
}
