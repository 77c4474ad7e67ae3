//! Session registry.
//!
//! This module provides in-memory storage for presenter sessions. A session
//! is identified by a short room code and stamped with its creation time.
//! Nothing is persisted; the registry lives as long as the process.
//!
//! # Architecture
//!
//! - [`RoomId`]: 6-character code drawn from an unambiguous alphabet
//! - [`Session`]: immutable record of one created room
//! - [`SessionStore`]: thread-safe store for all sessions
//!
//! # Example
//!
//! ```rust
//! use gyrolaser_server::session::SessionStore;
//!
//! let store = SessionStore::new();
//! let session = store.create_session();
//! assert_eq!(session.room_id.as_str().len(), 6);
//!
//! let sessions = store.list_sessions();
//! assert_eq!(sessions.len(), 1);
//! ```

mod room;
mod store;

pub use room::{ROOM_ID_ALPHABET, ROOM_ID_LENGTH, RoomId};
pub use store::{Session, SessionStore};
