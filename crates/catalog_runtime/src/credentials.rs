//! Salted password verifiers.
//!
//! Verifiers are stored as `sha256$<salt>$<hex digest>`. Records written before verifiers were
//! introduced hold the plaintext password and are compared verbatim.

use sha2::{Digest, Sha256};
use uuid::Uuid;

const SCHEME_PREFIX: &str = "sha256$";

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .fold(0_u8, |acc, (l, r)| acc | (l ^ r))
            == 0
}

/// Derives a fresh salted verifier for `password`.
pub(crate) fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = digest(&salt, password);
    format!("{SCHEME_PREFIX}{salt}${digest}")
}

/// Checks `candidate` against a stored verifier or legacy plaintext credential.
pub(crate) fn verify_password(stored: &str, candidate: &str) -> bool {
    match stored
        .strip_prefix(SCHEME_PREFIX)
        .and_then(|rest| rest.split_once('$'))
    {
        Some((salt, expected)) => {
            constant_time_eq(digest(salt, candidate).as_bytes(), expected.as_bytes())
        }
        None => constant_time_eq(stored.as_bytes(), candidate.as_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifier_accepts_only_the_original_password() {
        let stored = hash_password("secret1");
        assert!(stored.starts_with(SCHEME_PREFIX));
        assert!(!stored.contains("secret1"));
        assert!(verify_password(&stored, "secret1"));
        assert!(!verify_password(&stored, "secret2"));
        assert!(!verify_password(&stored, ""));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash_password("secret1"), hash_password("secret1"));
    }

    #[test]
    fn legacy_plaintext_is_compared_verbatim() {
        assert!(verify_password("secret1", "secret1"));
        assert!(!verify_password("secret1", "Secret1"));
        assert!(!verify_password("secret1", "secret"));
    }
}
