//! Identity: who is acting, and how they proved it.

mod provider;
mod session;
mod token;

pub use provider::{IdentityProvider, LocalIdentityProvider, SignUp};
pub use session::{AuthSession, SubscriptionToken};
pub use token::{Claims, actor_from_headers, issue_token, verify_token};
