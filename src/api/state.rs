//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::{SignUpCandidate, SignUpError, User, UserStore};
use crate::infrastructure::user::UserSignUpper;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub sign_up_service: Arc<dyn SignUpServiceTrait>,
}

impl AppState {
    pub fn new(sign_up_service: Arc<dyn SignUpServiceTrait>) -> Self {
        Self { sign_up_service }
    }

    /// State backed by a sign-upper over `store`
    pub fn from_store(store: Arc<dyn UserStore>) -> Self {
        Self::new(Arc::new(UserSignUpper::new(store)))
    }
}

/// Trait for sign-up service operations
#[async_trait::async_trait]
pub trait SignUpServiceTrait: Send + Sync {
    async fn sign_up(&self, candidate: SignUpCandidate) -> Result<User, SignUpError>;
    /// Opens and releases one store connection
    async fn check_store(&self) -> Result<(), SignUpError>;
}

#[async_trait::async_trait]
impl<S: UserStore + ?Sized + 'static> SignUpServiceTrait for UserSignUpper<S> {
    async fn sign_up(&self, candidate: SignUpCandidate) -> Result<User, SignUpError> {
        UserSignUpper::sign_up(self, candidate).await
    }

    async fn check_store(&self) -> Result<(), SignUpError> {
        UserSignUpper::check_store(self).await
    }
}
