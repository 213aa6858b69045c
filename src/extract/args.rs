// Command line for the `ops-extract` binary.
//
// Exactly one argument is accepted and it is always the dump path,
// even when it starts with `-`. There are no flags, so `--help` is
// a file name like any other.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ops-extract",
    about = "Print the type of every operator in a serialized program dump.",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct OpsArgs {
    /// Text dump of the serialized program
    #[arg(value_name = "BOOK_PROGRAM_FILE_PATH", allow_hyphen_values = true)]
    pub program_file: PathBuf,
}

/// Exit status for a wrong argument count.
pub const USAGE_EXIT_CODE: i32 = -1;

pub fn usage(program: &str) -> String {
    format!("Usage: {program} BOOK_PROGRAM_FILE_PATH")
}

/// Parse the full argument vector, program name first.
///
/// Anything other than exactly one argument after the program name
/// is rejected before clap sees it.
pub fn parse_args<I, T>(args: I) -> Result<OpsArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() != 2 {
        let kind = if args.len() < 2 {
            clap::error::ErrorKind::MissingRequiredArgument
        } else {
            clap::error::ErrorKind::TooManyValues
        };
        return Err(clap::Error::new(kind));
    }
    OpsArgs::try_parse_from(args)
}
