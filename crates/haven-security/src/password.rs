//! Password hashing with bcrypt

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
}

/// Salted one-way hashing with a configurable work factor.
///
/// The plaintext only ever passes through as a parameter; callers hash at
/// construction time and keep the digest.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashError(e.to_string()))
    }

    /// Compares a plaintext against a stored digest. A digest that fails to
    /// parse counts as a mismatch rather than an error surface.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PasswordService {
        // bcrypt's minimum cost (4) keeps the test rounds cheap.
        PasswordService::new(4)
    }

    #[test]
    fn correct_password_verifies() {
        let svc = service();
        let digest = svc.hash("hunter2hunter2").unwrap();
        assert!(svc.verify("hunter2hunter2", &digest));
    }

    #[test]
    fn wrong_password_fails() {
        let svc = service();
        let digest = svc.hash("hunter2hunter2").unwrap();
        assert!(!svc.verify("hunter3hunter3", &digest));
    }

    #[test]
    fn digest_is_not_the_plaintext() {
        let svc = service();
        let digest = svc.hash("hunter2hunter2").unwrap();
        assert!(!digest.contains("hunter2"));
        assert!(digest.starts_with("$2"));
    }

    #[test]
    fn garbage_digest_is_a_mismatch() {
        let svc = service();
        assert!(!svc.verify("anything", "not-a-bcrypt-digest"));
    }
}
