use super::provider::{IdentityProvider, SignUp};
use crate::errors::Result;
use crate::models::User;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tracing::info;

type Listener = Arc<dyn Fn(Option<&User>) + Send + Sync>;

/// Handle returned by [`AuthSession::on_change`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// The signed-in user of one client, if any.
///
/// Repositories never read this directly: callers pass
/// `session.current_user().as_ref()` as the actor of each call.
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    current: RwLock<Option<User>>,
    listeners: DashMap<u64, Listener>,
    next_token: AtomicU64,
}

impl AuthSession {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            current: RwLock::new(None),
            listeners: DashMap::new(),
            next_token: AtomicU64::new(0),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.read().clone()
    }

    /// Registers an account. The session stays signed out.
    pub async fn sign_up(&self, request: SignUp) -> Result<User> {
        self.provider.sign_up(request).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let user = self.provider.sign_in(email, password).await?;
        *self.current.write() = Some(user.clone());

        info!("User signed in: {}", user.email);
        self.notify(Some(&user));

        Ok(user)
    }

    pub fn sign_out(&self) {
        let previous = self.current.write().take();
        if let Some(user) = previous {
            info!("User signed out: {}", user.email);
            self.notify(None);
        }
    }

    /// Calls `listener` with the current user now and after every change.
    pub fn on_change<F>(&self, listener: F) -> SubscriptionToken
    where
        F: Fn(Option<&User>) + Send + Sync + 'static,
    {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let listener: Listener = Arc::new(listener);
        self.listeners.insert(token, Arc::clone(&listener));

        let current = self.current_user();
        listener(current.as_ref());

        SubscriptionToken(token)
    }

    /// Returns false if the token was already unsubscribed.
    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        self.listeners.remove(&token.0).is_some()
    }

    fn notify(&self, user: Option<&User>) {
        // snapshot first so listeners may (un)subscribe without deadlocking the map
        let listeners: Vec<Listener> = self
            .listeners
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        for listener in listeners {
            listener(user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::LocalIdentityProvider;
    use crate::errors::BoardError;
    use parking_lot::Mutex;

    async fn session() -> AuthSession {
        let provider = Arc::new(LocalIdentityProvider::new(4));
        provider
            .sign_up(SignUp::new("alice@example.com", "secret1"))
            .await
            .unwrap();
        AuthSession::new(provider)
    }

    #[tokio::test]
    async fn starts_signed_out() {
        assert!(session().await.current_user().is_none());
    }

    #[tokio::test]
    async fn sign_in_and_out() {
        let session = session().await;
        let user = session.sign_in("alice@example.com", "secret1").await.unwrap();
        assert_eq!(session.current_user(), Some(user));

        session.sign_out();
        assert!(session.current_user().is_none());
    }

    #[tokio::test]
    async fn failed_sign_in_keeps_state() {
        let session = session().await;
        let result = session.sign_in("alice@example.com", "wrong").await;
        assert!(matches!(result, Err(BoardError::InvalidCredentials)));
        assert!(session.current_user().is_none());
    }

    #[tokio::test]
    async fn listeners_see_every_change_until_unsubscribed() {
        let session = session().await;
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let token = session.on_change(move |user| {
            sink.lock().push(user.map(|u| u.email.clone()));
        });

        session.sign_in("alice@example.com", "secret1").await.unwrap();
        session.sign_out();
        session.sign_out(); // already signed out: no event

        assert!(session.unsubscribe(token));
        assert!(!session.unsubscribe(token));
        session.sign_in("alice@example.com", "secret1").await.unwrap();

        assert_eq!(
            *seen.lock(),
            vec![None, Some("alice@example.com".to_string()), None]
        );
    }
}
