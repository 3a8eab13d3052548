//! Fetch the target page once and print its body.
//!
//! Standard output carries only the body. Diagnostics go to standard error,
//! and any failure ends the process with a non-zero exit status.

use std::{io, process::ExitCode};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let result = fetcher::run(fetcher::TARGET_URL, io::stdout().lock());

    ExitCode::from(fetcher::report(fetcher::TARGET_URL, result, io::stderr()))
}
