//! Index synchronization: keeping the document store in step with the
//! bookmark tree.

mod synchronizer;
mod worker;

pub use synchronizer::{IndexSynchronizer, SyncReport, SyncTrigger};
pub use worker::{spawn_synchronizer, SyncHandle};
