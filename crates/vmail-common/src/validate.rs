//! Syntax checks for domain names and email addresses

use crate::types::split_address;
use regex::Regex;
use std::sync::OnceLock;

static ACCOUNT_RE: OnceLock<Regex> = OnceLock::new();
static DOMAIN_RE: OnceLock<Regex> = OnceLock::new();

fn account_regex() -> &'static Regex {
    ACCOUNT_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+$")
            .unwrap_or_else(|error| panic!("account regex failed to compile: {error}"))
    })
}

fn domain_regex() -> &'static Regex {
    DOMAIN_RE.get_or_init(|| {
        // Final label is alphabetic with at least two characters.
        Regex::new(r"^[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .unwrap_or_else(|error| panic!("domain regex failed to compile: {error}"))
    })
}

/// Check if a string constitutes a valid domain name
pub fn is_valid_domain_name(domain_name: &str) -> bool {
    domain_regex().is_match(domain_name)
}

/// Check if a string constitutes a valid email address.
///
/// With `domain_only` set only the part after the first `@` is checked, which
/// lets alias endpoints such as `@example.com` through.
pub fn is_valid_email(email: &str, domain_only: bool) -> bool {
    let Some((account, domain)) = split_address(email) else {
        return false;
    };

    if domain_only {
        is_valid_domain_name(domain)
    } else {
        account_regex().is_match(account) && is_valid_domain_name(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in ["someone@somewhere.com", "anybody@elsewhere.com", "a@s.co", "first.last+tag@mail.example.org"] {
            assert!(is_valid_email(email, false), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "@somewhere.com",
            "elsewhere.com",
            "chip&dale@somewhere.com",
            "chip@somewhere",
        ] {
            assert!(!is_valid_email(email, false), "{email} should be invalid");
        }
    }

    #[test]
    fn test_domain_only_emails() {
        for email in ["someone@somewhere.com", "@elsewhere.com", "@s.co", "chip&dale@somewhere.com"] {
            assert!(is_valid_email(email, true), "{email} should pass a domain-only check");
        }
        assert!(!is_valid_email("elsewhere.com", true));
        assert!(!is_valid_email("@somewhere", true));
    }

    #[test]
    fn test_valid_domain_names() {
        for domain in ["somewhere.com", "elsewhere.com", "a.co", "mail.sub-domain.example.org"] {
            assert!(is_valid_domain_name(domain), "{domain} should be valid");
        }
    }

    #[test]
    fn test_invalid_domain_names() {
        for domain in [
            "",
            "&somewhere.com",
            "somewhere",
            "a.b",
            "user@somewhere.com",
            "https://somewhere.com",
            "somewhere.c0m",
        ] {
            assert!(!is_valid_domain_name(domain), "{domain} should be invalid");
        }
    }
}
