pub mod args;
pub mod discover;
pub mod export;
pub mod links;
pub mod model;
pub mod opener;
pub mod pipeline;
pub mod prompt;
pub mod utils;

pub use args::Args;
pub use export::{ExportFormat, ExportParser, ParseError};
pub use model::{DiffResult, LinkList, NormalizedLists, RunSummary};
pub use pipeline::{print_run_summary, run_follow_audit};
