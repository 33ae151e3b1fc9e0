//! Type definitions of the boolean fragments the query templates are assembled from.

/// A boolean connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn keyword(self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
        }
    }
}

/// A rendered predicate together with the connective that attaches it to the
/// predicate before it.
///
/// An empty fragment stands for "no filter": it renders to nothing and takes its
/// connective with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub connective: Connective,
    pub sql: String,
}

impl Fragment {
    pub fn new(connective: Connective, sql: impl Into<String>) -> Fragment {
        Fragment {
            connective,
            sql: sql.into(),
        }
    }

    pub fn and(sql: impl Into<String>) -> Fragment {
        Fragment::new(Connective::And, sql)
    }

    pub fn or(sql: impl Into<String>) -> Fragment {
        Fragment::new(Connective::Or, sql)
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Wrap the predicate in parentheses. Empty fragments stay empty.
    #[must_use]
    pub fn parenthesized(self) -> Fragment {
        if self.is_empty() {
            self
        } else {
            Fragment {
                connective: self.connective,
                sql: format!("({})", self.sql),
            }
        }
    }
}

impl std::fmt::Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}
