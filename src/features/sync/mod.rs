//! Server sync.
//!
//! A sync pulls the endpoint's records, replaces the local quote list with
//! them and optionally pushes the result back. Syncs run on a timer, at
//! startup, or on demand.

pub mod agent;
pub mod remote;
pub mod schedule;

pub use agent::{
    map_remote, SyncAgent, SyncOptions, SyncReport, SyncTrigger, SYNCED_MESSAGE,
    SYNC_FAILED_MESSAGE,
};
pub use remote::{HttpRemote, QuoteRemote};
pub use schedule::{run_periodic, spawn_timer};
