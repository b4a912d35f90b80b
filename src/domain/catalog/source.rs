use async_trait::async_trait;
use std::fmt::Debug;

use super::ApiModel;
use crate::domain::DomainError;

/// Anything that can list the models a platform currently serves
#[async_trait]
pub trait ModelSource: Send + Sync + Debug {
    async fn list_models(&self) -> Result<Vec<ApiModel>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    #[derive(Debug, Default)]
    pub struct MockModelSource {
        models: Vec<ApiModel>,
        fail: bool,
    }

    impl MockModelSource {
        pub fn new(models: Vec<ApiModel>) -> Self {
            Self { models, fail: false }
        }

        pub fn failing() -> Self {
            Self {
                models: Vec::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl ModelSource for MockModelSource {
        async fn list_models(&self) -> Result<Vec<ApiModel>, DomainError> {
            if self.fail {
                return Err(DomainError::provider("mock", "connection refused"));
            }
            Ok(self.models.clone())
        }
    }
}
