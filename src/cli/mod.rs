//! CLI command handling.
//!
//! Provides subcommands for:
//! - Running the HTTP server (`serve`, the default)
//! - Printing recent history (`history`)
//! - Analyzing a single text from the shell (`analyze`)

mod history;

pub use history::{run_analyze_command, run_history_command};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sentiscope")]
#[command(about = "Sentiment analysis service with persistent history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind, overrides SERVER_HOST
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides SERVER_PORT
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Print the most recent records
    History {
        /// Number of records to show
        #[arg(long, short, default_value_t = crate::config::DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },

    /// Classify and record one text, printing the result as JSON
    Analyze {
        /// Text to classify
        text: String,
    },
}
