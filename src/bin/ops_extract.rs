// ============================================================
// ops-extract — operator names from a program dump
// ============================================================
// Usage: ops-extract BOOK_PROGRAM_FILE_PATH
//
// Prints one operator type per line. A wrong argument count
// prints the usage line and exits with status -1 before any
// file is opened.

use anyhow::Result;
use std::io;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("oneword_conv=warn".parse()?),
        )
        .init();

    let code = oneword_conv::extract::run(std::env::args_os(), io::stdout().lock(), io::stderr())?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
