//! Content repository and authorization layer for a small posting board.
//!
//! Signed-in users create, edit and delete their own posts and comments;
//! anyone may browse, filter by tag and search. All writes go through
//! [`PostRepository`] and [`CommentRepository`], which check ownership with
//! [`guard`] before the [`RemoteStore`] sees anything.
//!
//! Derived views ([`tags`], [`search`], [`pagination`]) are pure functions
//! over lists the caller already fetched.

pub mod auth;
pub mod config;
pub mod detail;
pub mod dto;
pub mod errors;
pub mod guard;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod search;
pub mod states;
pub mod store;
pub mod tags;

pub use auth::{AuthSession, IdentityProvider, LocalIdentityProvider};
pub use errors::{BoardError, Result};
pub use models::{Comment, CommentDraft, Post, PostDraft, PostPatch, User};
pub use repository::{CommentRepository, PostRepository};
pub use states::AppState;
pub use store::{Collection, MemoryStore, RemoteStore};
