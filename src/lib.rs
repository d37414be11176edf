//! # minibuild
//!
//! Orchestration core for a minimal build tool.
//!
//! ## Design Philosophy
//!
//! minibuild is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Explicitly threaded** - The offline switch and the log sink travel
//!   in a [`Context`]; nothing hides in process-wide statics
//! - **Cache-honest** - The filesystem is the cache index; a resolved
//!   artifact is a plain file, stored byte-for-byte as received
//!
//! Three subsystems cooperate: the [task runner](runner) drives
//! heterogeneous build tasks sequentially or concurrently with
//! join/barrier semantics; the [resolver](resolver) turns a dependency
//! [`Coordinate`] into a verified local cache file, delegating transfers
//! to the conditional-fetch [downloader](download); and the
//! [tree operations](tree) underneath both handle bulk walk/copy/delete.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use minibuild::{Context, Invocation, Run, StdoutSink, Task, TaskRunner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = Context::new(Arc::new(StdoutSink));
//!     let runner = TaskRunner::new();
//!     let code = runner
//!         .run(
//!             &ctx,
//!             "build",
//!             Run::Sequential(vec![
//!                 Task::invocation(Invocation::new("cc").args(["-O2", "main.c"])),
//!                 Task::function("package", || 0),
//!             ]),
//!         )
//!         .await?;
//!     std::process::exit(code)
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Execution context: offline flag and contract log sink
pub mod context;
/// Dependency coordinates
pub mod coordinate;
/// Cache-aware conditional-fetch downloader
pub mod download;
/// Error types
pub mod error;
/// Project and module-group configuration
pub mod project;
/// Coordinate-to-cache-file resolution
pub mod resolver;
/// Task runner and process-execution capability
pub mod runner;
/// Directory tree walk/copy/delete
pub mod tree;

pub use config::RunnerConfig;
pub use context::{Context, LogSink, MemorySink, StdoutSink};
pub use coordinate::{Coordinate, CoordinateBuilder};
pub use download::Downloader;
pub use error::{Error, ErrorKind, Result};
pub use project::{ModuleGroup, ModuleGroupBuilder, Project, ProjectBuilder};
pub use resolver::Resolver;
pub use runner::{
    Invocation, ProcessOutput, ProcessRunner, Run, SystemProcessRunner, Task, TaskRunner,
};
