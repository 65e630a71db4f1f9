use crate::errors::{BoardError, Result};
use crate::models::User;
use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash, verify};
use dashmap::{DashMap, mapref::entry::Entry};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUp {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 100, message = "Password must be 6-100 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirm: String,
}

impl SignUp {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            email: email.into(),
            password_confirm: password.clone(),
            password,
        }
    }
}

/// External identity service the session delegates to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, request: SignUp) -> Result<User>;

    /// Returns `Err(BoardError::InvalidCredentials)` on unknown email or
    /// wrong password, without saying which.
    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    async fn find_user(&self, user_id: &str) -> Option<User>;
}

struct Account {
    user: User,
    hashed_password: String,
}

/// Identity provider backed by in-process maps and bcrypt hashes.
pub struct LocalIdentityProvider {
    accounts: DashMap<String, Account>,
    email_index: DashMap<String, String>, // Quick Lookup by Email
    cost: u32,
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl LocalIdentityProvider {
    pub fn new(cost: u32) -> Self {
        Self {
            accounts: DashMap::new(),
            email_index: DashMap::new(),
            cost,
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(&self, mut request: SignUp) -> Result<User> {
        request.email = normalize_email(&request.email);
        request.validate()?;

        let email = request.email.clone();
        if self.email_index.contains_key(&email) {
            return Err(BoardError::UserAlreadyExists);
        }

        let cost = self.cost;
        let password = request.password;
        let hashed_password = tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| BoardError::Internal(format!("Password hashing aborted: {}", e)))?
            .map_err(|e| BoardError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = User::new(Uuid::new_v4().to_string(), email.clone());

        // re-checked under the shard lock: two sign-ups may race past the fast path
        match self.email_index.entry(email) {
            Entry::Occupied(_) => return Err(BoardError::UserAlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
            }
        }
        self.accounts.insert(
            user.id.clone(),
            Account {
                user: user.clone(),
                hashed_password,
            },
        );

        info!("New user registered: {}", user.email);

        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);

        let (user, hashed_password) = {
            let user_id = self
                .email_index
                .get(&email)
                .ok_or(BoardError::InvalidCredentials)?;
            let account = self
                .accounts
                .get(user_id.value())
                .ok_or(BoardError::InvalidCredentials)?;
            (account.user.clone(), account.hashed_password.clone())
        };

        let password = password.to_string();
        let valid = tokio::task::spawn_blocking(move || verify(password, &hashed_password))
            .await
            .map_err(|e| BoardError::Internal(format!("Password verification aborted: {}", e)))?
            .map_err(|e| BoardError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(BoardError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn find_user(&self, user_id: &str) -> Option<User> {
        self.accounts.get(user_id).map(|account| account.user.clone())
    }
}
