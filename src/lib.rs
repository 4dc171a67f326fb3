pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod inspect;
pub mod invoke;
pub mod model;
pub mod output;
pub mod provider;
pub mod style;

pub use api::{InspectorError, OpenOptions, open, render_plain};
pub use cli::Cli;
pub use commands::cmd_inspect;
pub use config::{Config, InspectionRequest};
pub use inspect::{InspectError, Session, Snapshot};
pub use model::{CallResult, InstanceUse, InvocationRequest, InvocationResult, Value};
pub use output::{Discovery, DumpOptions, Grouping, ListingOptions};
