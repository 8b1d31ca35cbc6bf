//! Common types for vmail

/// Identifier of a row in `virtual_domains`
pub type DomainId = i64;

/// Identifier of a row in `virtual_users`
pub type UserId = i64;

/// Identifier of a row in `virtual_aliases`
pub type AliasId = i64;

/// Split an address at its first `@` into account and domain parts.
///
/// The account part may be empty (`@example.com` is a catch-all alias
/// endpoint), so this only fails when there is no `@` at all.
pub fn split_address(address: &str) -> Option<(&str, &str)> {
    address.split_once('@')
}

/// Domain part of an address, everything after the first `@`
pub fn address_domain(address: &str) -> Option<&str> {
    split_address(address).map(|(_, domain)| domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_address() {
        assert_eq!(split_address("user@example.com"), Some(("user", "example.com")));
        assert_eq!(split_address("@example.com"), Some(("", "example.com")));
        assert_eq!(split_address("a@b@c.org"), Some(("a", "b@c.org")));
        assert_eq!(split_address("example.com"), None);
    }

    #[test]
    fn test_address_domain() {
        assert_eq!(address_domain("user@test.com"), Some("test.com"));
        assert_eq!(address_domain("nobody"), None);
    }
}
