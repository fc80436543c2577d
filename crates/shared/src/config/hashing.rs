use crate::{abstract_trait::HashingTrait, errors::ServiceError};
use async_trait::async_trait;
use bcrypt::{hash, verify};

const HASH_COST: u32 = 12;

#[derive(Clone)]
pub struct Hashing {
    cost: u32,
}

impl Hashing {
    pub fn new() -> Self {
        Self { cost: HASH_COST }
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for Hashing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HashingTrait for Hashing {
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let password = password.to_owned();
        let cost = self.cost;

        // bcrypt is CPU bound; keep it off the reactor threads.
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| ServiceError::Internal(format!("hashing task failed: {e}")))?
            .map_err(ServiceError::Bcrypt)
    }

    async fn compare_password(
        &self,
        hashed_password: &str,
        password: &str,
    ) -> Result<bool, ServiceError> {
        verify(password, hashed_password).map_err(ServiceError::Bcrypt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashed_password_verifies() {
        let hashing = Hashing::with_cost(4);

        let hashed = hashing.hash_password("segredo123").await.unwrap();

        assert_ne!(hashed, "segredo123");
        assert!(hashing.compare_password(&hashed, "segredo123").await.unwrap());
        assert!(!hashing.compare_password(&hashed, "outra-senha").await.unwrap());
    }
}
