//! # Catview CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only starts the runtime, invokes `cli::run()` and handles process
//! termination.
//!
//! ```text
//! main.rs            tokio runtime, exit code
//! cli/setup.rs       clap argument definitions
//! cli/commands.rs    logging init, context wiring, dispatch
//! cli/render.rs      CmdResult → terminal text (minijinja templates)
//! cli/styles.rs      named styles, light and dark themes
//! cli/templates.rs   template files embedded with include_str!
//! ```

mod cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprint!("{}", cli::report_error(&e));
        std::process::exit(1);
    }
}
