//! # Change Feed
//!
//! A type-safe, asynchronous change feed connecting repository writes to
//! trigger workers, designed for vertical slice architectures.
//!
//! ## Overview
//!
//! Provides a centralized [`ChangeFeed`] with two channel kinds:
//! * **Broadcast** — fan-out to every observer of a change type.
//! * **Queue** — a bounded queue drained by a single trigger worker, the
//!   in-process analogue of a container change-feed trigger.
//!
//! Built on `tokio` primitives with `FxHashMap` + `parking_lot::RwLock`.
//!
//! # Example
//!
//! ```rust
//! use ihub_feed::{ChangeFeed, FeedError, FeedReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct RecordInserted { id: u64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), FeedError> {
//!     let feed = ChangeFeed::new();
//!
//!     let mut rx = feed.observe::<RecordInserted>()?;
//!     feed.emit(RecordInserted { id: 42 })?;
//!
//!     if let Some(change) = rx.next_change().await {
//!         assert_eq!(change.id, 42);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod feed;
mod receiver;

pub use error::{FeedError, FeedErrorExt};
pub use feed::{Change, ChangeFeed};
pub use receiver::FeedReceiverExt;
