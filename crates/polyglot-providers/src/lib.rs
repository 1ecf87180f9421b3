//! # polyglot-providers
//!
//! Remote HTTP collaborators for Polyglot: the machine-translation backend,
//! the TTL cache in front of it, and the joke API client.

pub mod cache;
pub mod jokes;
pub mod mymemory;

pub use cache::TranslationCache;
pub use jokes::{Joke, JokeClient};
pub use mymemory::MyMemoryBackend;
