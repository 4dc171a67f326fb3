//! Tagged-markup rendering of snapshots and invocation results.
//!
//! Everything here produces markup text (`[tag]...[/]`, `[br]`, `[tab]`);
//! turning it into terminal output is left to [`crate::style::Renderer`].

pub mod dump;
mod invocation;
pub mod listing;
mod markup;

pub use dump::{DumpOptions, GLOBAL_NAMESPACE, MAX_DEPTH};
pub use invocation::{completed, found_types, invocation, loaded, loading};
pub use listing::{Discovery, Grouping, ListingOptions};
pub use markup::NONE_PRESENT;
