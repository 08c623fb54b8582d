//! CLI module for the screener
//!
//! Provides command-line interface for:
//! - query: One-shot filter/sort/page over a dataset
//! - explain: One-shot explain of a query
//! - fields: Alias listing
//! - start: Session mode over stdin/stdout

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod render;
mod session;

pub use args::{Cli, Command, QueryArgs};
pub use commands::{explain, fields, query, run, run_command, start};
pub use config::{Config, OutputFormat};
pub use errors::{CliError, CliErrorCode, CliResult, SessionError};
pub use io::{error_envelope, ok_envelope, read_requests, write_response};
pub use render::{render_fields, render_page, render_pager, render_window};
pub use session::{ScreenSession, SessionRequest, SessionView};
