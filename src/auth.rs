// Copyright (c) 2025 - Cowboy AI, Inc.
//! Administrator credential check

/// Verifies an administrator password
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, password: &str) -> bool;
}

/// One shared password for every administrator
#[derive(Debug, Clone)]
pub struct StaticPasswordCheck {
    password: String,
}

impl StaticPasswordCheck {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl CredentialCheck for StaticPasswordCheck {
    fn verify(&self, password: &str) -> bool {
        !self.password.is_empty() && self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("admin123", true ; "exact match")]
    #[test_case("Admin123", false ; "case sensitive")]
    #[test_case("admin123 ", false ; "no trimming")]
    #[test_case("", false ; "empty")]
    fn test_verify(candidate: &str, expected: bool) {
        assert_eq!(StaticPasswordCheck::new("admin123").verify(candidate), expected);
    }

    #[test]
    fn test_empty_configured_password_never_matches() {
        assert!(!StaticPasswordCheck::new("").verify(""));
    }
}
