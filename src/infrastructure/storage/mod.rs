//! Local persistence for the client
//!
//! The only state this client keeps on disk is the session file holding the
//! bearer token and username. Everything else is fetched fresh from the
//! backend on each run.

pub mod session;
pub mod token_store;

pub use session::SessionContext;
pub use token_store::{StoredSession, TokenStore};
