//! Sign-up command - registers one user from the command line

use std::sync::Arc;

use clap::Args;
use uuid::Uuid;

use crate::domain::user::{SignUpCandidate, SignUpError, User, UserStore};
use crate::infrastructure::storage::StorageFactory;
use crate::infrastructure::user::UserSignUpper;

#[derive(Args, Debug, Clone)]
pub struct SignUpArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unique username, 5 to 32 characters
    #[arg(long)]
    pub username: String,

    /// Unique email address
    #[arg(long)]
    pub email_address: String,

    /// Use this id instead of a generated UUID v4
    #[arg(long)]
    pub id: Option<String>,
}

impl SignUpArgs {
    fn into_candidate(self) -> SignUpCandidate {
        let id = self.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        SignUpCandidate::new(id, self.name, self.username, self.email_address)
    }
}

/// Register the user against the configured store
pub async fn run(args: SignUpArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let store = StorageFactory::create_user_store(&config.storage).await?;

    let user = register(store, args).await?;
    println!("User registered: {} ({})", user.username(), user.id());

    Ok(())
}

async fn register(store: Arc<dyn UserStore>, args: SignUpArgs) -> Result<User, SignUpError> {
    UserSignUpper::new(store).sign_up(args.into_candidate()).await
}
