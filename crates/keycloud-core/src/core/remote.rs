use crate::api::client::KeycloudClient;
use crate::api::models::WireCredential;
use crate::error::ApiError;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote persistence for credential entries.
///
/// Every call is a single request; success means the service answered 200.
#[async_trait]
pub trait RemoteCredentialService: Send + Sync {
    /// Fetch the full list in server order
    async fn fetch_all(&self) -> Result<Vec<WireCredential>, ApiError>;

    /// Store a new credential
    async fn add(&self, username: &str, password: &str, url: &str) -> Result<(), ApiError>;

    /// Delete by username and url; ids are not part of the delete contract
    async fn remove(&self, username: &str, url: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl RemoteCredentialService for KeycloudClient {
    async fn fetch_all(&self) -> Result<Vec<WireCredential>, ApiError> {
        self.fetch_credentials().await
    }

    async fn add(&self, username: &str, password: &str, url: &str) -> Result<(), ApiError> {
        self.add_credential(username, password, url).await
    }

    async fn remove(&self, username: &str, url: &str) -> Result<(), ApiError> {
        self.remove_credential(username, url).await
    }
}

#[async_trait]
impl<T> RemoteCredentialService for Arc<T>
where
    T: RemoteCredentialService + ?Sized,
{
    async fn fetch_all(&self) -> Result<Vec<WireCredential>, ApiError> {
        (**self).fetch_all().await
    }

    async fn add(&self, username: &str, password: &str, url: &str) -> Result<(), ApiError> {
        (**self).add(username, password, url).await
    }

    async fn remove(&self, username: &str, url: &str) -> Result<(), ApiError> {
        (**self).remove(username, url).await
    }
}
