//! Domain layer for the bookshelf.
//!
//! This module holds the book model and the in-memory collection that owns
//! it, independent of Zellij, storage media, or rendering.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`book`]: `Book`, `BookId`, and the validated `NewBook` request
//! - [`id`]: Monotonic, time-seeded id generation
//! - [`repository`]: The ordered collection with its invariants
//!
//! # Examples
//!
//! ```
//! use bookshelf::domain::{BookRepository, NewBook, Result};
//!
//! fn stock_shelf() -> Result<BookRepository> {
//!     let mut shelf = BookRepository::new();
//!     shelf.add(NewBook::new("Dune", "Frank Herbert", 1965, false)?)?;
//!     Ok(shelf)
//! }
//! # stock_shelf().unwrap();
//! ```

pub mod book;
pub mod error;
pub mod id;
pub mod repository;

pub use book::{Book, BookId, NewBook};
pub use error::{BookshelfError, Result};
pub use id::IdGenerator;
pub use repository::BookRepository;
