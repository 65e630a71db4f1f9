//! The only mutation entry point into the store.
//!
//! Every mutating call authenticates and checks ownership before the store
//! sees a write. Reads re-fetch on every call; nothing is cached here.

mod comments;
mod posts;

pub use comments::CommentRepository;
pub use posts::PostRepository;
