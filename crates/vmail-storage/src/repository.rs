//! Repository layer for data access

pub mod aliases;
pub mod domains;
pub mod users;

// Re-export concrete repository implementations with simple names
pub use aliases::DbAliasRepository as AliasRepository;
pub use domains::DbDomainRepository as DomainRepository;
pub use users::DbUserRepository as UserRepository;

// Re-export repository traits
pub use aliases::AliasRepository as AliasRepositoryTrait;
pub use domains::DomainRepository as DomainRepositoryTrait;
pub use users::UserRepository as UserRepositoryTrait;

/// How a search pattern is compared against a column.
///
/// Prefix matching appends `%` and uses `LIKE` without escaping, so callers
/// may embed their own `%` and `_` wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Prefix,
}

impl MatchMode {
    pub fn from_exact(exact: bool) -> Self {
        if exact {
            MatchMode::Exact
        } else {
            MatchMode::Prefix
        }
    }

    /// SQL condition comparing `column` with positional parameter `index`
    pub(crate) fn condition(self, column: &str, index: usize) -> String {
        match self {
            MatchMode::Exact => format!("{} = ${}", column, index),
            MatchMode::Prefix => format!("{} LIKE ${}", column, index),
        }
    }

    /// Value bound for the parameter of [`MatchMode::condition`]
    pub(crate) fn bind_value(self, pattern: &str) -> String {
        match self {
            MatchMode::Exact => pattern.to_string(),
            MatchMode::Prefix => format!("{}%", pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_mode_sql() {
        assert_eq!(MatchMode::from_exact(true), MatchMode::Exact);
        assert_eq!(MatchMode::Exact.condition("name", 1), "name = $1");
        assert_eq!(MatchMode::Exact.bind_value("test.com"), "test.com");

        assert_eq!(MatchMode::from_exact(false), MatchMode::Prefix);
        assert_eq!(MatchMode::Prefix.condition("email", 2), "email LIKE $2");
        assert_eq!(MatchMode::Prefix.bind_value("%.com"), "%.com%");
        assert_eq!(MatchMode::Prefix.bind_value(""), "%");
    }
}
