//! Client catalog rules.

/// Entity label used in errors and logs.
pub const ENTITY: &str = "Client";

/// Maximum length of a client name.
pub const MAX_NAME_LENGTH: u64 = 200;

/// Accepted age range (inclusive).
pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;

/// How a free-text client search is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientSearch {
    /// The term parsed as an identifier.
    ById(i64),
    /// Case-insensitive substring match on the name.
    ByName(String),
}

impl ClientSearch {
    /// Numeric terms look up by id; anything else searches by name.
    ///
    /// Blank terms mean "no search".
    pub fn parse(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        Some(match term.parse::<i64>() {
            Ok(id) => ClientSearch::ById(id),
            Err(_) => ClientSearch::ByName(term.to_string()),
        })
    }

    /// The `ILIKE` pattern for a name search, with wildcards escaped.
    pub fn like_pattern(name: &str) -> String {
        let escaped = name
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{escaped}%")
    }
}
