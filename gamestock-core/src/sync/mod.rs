//! Remote synchronization.
//!
//! `Remote` abstracts the collection endpoints, `HttpRemote` talks to the
//! catalog server over JSON, and `SyncCoordinator` issues operations and
//! reconciles confirmed results into the local catalog.

mod coordinator;
mod error;
mod remote;

pub use coordinator::SyncCoordinator;
pub use error::{SubmitError, SyncError};
pub use remote::{HttpRemote, Remote};
