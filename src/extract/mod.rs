// ============================================================
// Operator-Name Extractor
// ============================================================
// Streams a text dump of a serialized program and prints the
// `type:` value of every operator. Unrelated to the sentiment
// pipeline; it shares no code with it.
//
// The dump is whitespace-delimited. Sections open with a bare
// keyword on its own line:
//
//   ops {                ← enter the operator section
//     type: "conv2d"     ← emitted as: conv2d
//     inputs { ... }
//   }
//   vars { ... }         ← leave it (so does `attrs`)
//     type: "ignored"    ← not an operator, skipped
//
// Only the first token of each line matters. The scanner is a two
// state machine over that token:
//
//   Outside   --ops-->          InsideOps
//   InsideOps --vars | attrs--> Outside
//
// Nested `attrs` blocks inside an operator also close the section,
// so later `type:` lines of the same operator are skipped until the
// next `ops` line.

pub mod args;

use anyhow::{Context, Result};
use std::{
    ffi::OsString,
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use args::{parse_args, usage, USAGE_EXIT_CODE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Outside,
    InsideOps,
}

/// Line-at-a-time section tracker.
#[derive(Debug, Default)]
pub struct OpsScanner {
    section: Section,
}

impl OpsScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Feed one line; returns the decoded operator type if the line names one.
    pub fn feed(&mut self, line: &str) -> Option<String> {
        let mut tokens = line.split_whitespace();
        let first = tokens.next()?;

        match first {
            "ops" => self.section = Section::InsideOps,
            "vars" | "attrs" => self.section = Section::Outside,
            _ => {}
        }

        if self.section == Section::InsideOps && first == "type:" {
            // A `type:` with no value is malformed; skip it
            return tokens.next().map(decode_literal);
        }
        None
    }
}

/// Unquote a string literal token; anything unquoted is returned unchanged.
///
/// Handles `"..."` and `'...'` with the escapes `\\`, `\"`, `\'`, `\n`,
/// `\t` and `\r`. Unknown escapes keep their backslash.
pub fn decode_literal(token: &str) -> String {
    let bytes = token.as_bytes();
    let quoted = bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0];
    if !quoted {
        return token.to_string();
    }

    let inner = &token[1..token.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n')  => out.push('\n'),
            Some('t')  => out.push('\t'),
            Some('r')  => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('"')  => out.push('"'),
            Some('\'') => out.push('\''),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Scan `reader` and write one operator type per line to `out`.
/// Returns how many operators were written.
pub fn extract_ops<R: BufRead, W: Write>(reader: R, mut out: W) -> Result<usize> {
    let mut scanner = OpsScanner::new();
    let mut count = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Cannot read line {}", lineno + 1))?;
        if let Some(op_type) = scanner.feed(&line) {
            writeln!(out, "{op_type}")?;
            count += 1;
        }
    }

    out.flush()?;
    Ok(count)
}

/// Open `path`, scan it and print to `out`. The file is closed on return.
pub fn extract_ops_from_file<W: Write>(path: &Path, out: W) -> Result<usize> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open program dump '{}'", path.display()))?;
    let count = extract_ops(BufReader::new(file), out)?;
    tracing::debug!("Found {} operators in '{}'", count, path.display());
    Ok(count)
}

/// Whole `ops-extract` run: check the arguments, then scan the dump.
///
/// Returns the process exit status. A wrong argument count writes the
/// usage line to `err` and returns [`USAGE_EXIT_CODE`] without touching
/// the filesystem; a failed scan is an `Err`.
pub fn run<I, T, W, E>(args: I, out: W, mut err: E) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ops-extract".to_string());

    let parsed = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(_) => {
            writeln!(err, "{}", usage(&program))?;
            return Ok(USAGE_EXIT_CODE);
        }
    };

    extract_ops_from_file(&parsed.program_file, out)?;
    Ok(0)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> Vec<String> {
        let mut out = Vec::new();
        extract_ops(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn test_prints_types_inside_ops_only() {
        let input = "ops\ntype: \"conv\"\ntype: \"fc\"\nvars\ntype: \"ignored\"\n";
        assert_eq!(run(input), vec!["conv", "fc"]);
    }

    #[test]
    fn test_attrs_closes_ops_like_vars() {
        let input = "ops {\n  type: \"mul\"\n  attrs {\n    type: INT\n  }\n}\n";
        assert_eq!(run(input), vec!["mul"]);
    }

    #[test]
    fn test_type_before_ops_is_ignored() {
        let input = "type: \"early\"\nops\ntype: \"late\"\n";
        assert_eq!(run(input), vec!["late"]);
    }

    #[test]
    fn test_reopening_ops_section() {
        let input = "ops\ntype: \"a\"\nvars\nops\ntype: \"b\"\n";
        assert_eq!(run(input), vec!["a", "b"]);
    }

    #[test]
    fn test_blank_and_malformed_lines() {
        let input = "\n   \nops\ntype:\ntype: \"ok\"\n";
        assert_eq!(run(input), vec!["ok"]);
    }

    #[test]
    fn test_state_transitions() {
        let mut s = OpsScanner::new();
        assert_eq!(s.section(), Section::Outside);
        s.feed("  ops {");
        assert_eq!(s.section(), Section::InsideOps);
        s.feed("attrs {");
        assert_eq!(s.section(), Section::Outside);
    }

    #[test]
    fn test_decode_literal() {
        assert_eq!(decode_literal("\"conv2d\""), "conv2d");
        assert_eq!(decode_literal("'relu'"), "relu");
        assert_eq!(decode_literal("\"a\\\"b\""), "a\"b");
        assert_eq!(decode_literal("\"x\\ny\""), "x\ny");
        assert_eq!(decode_literal("bare"), "bare");
        assert_eq!(decode_literal("\""), "\"");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = extract_ops_from_file(Path::new("/no/such/dump.txt"), Vec::new());
        assert!(err.is_err());
    }

    #[test]
    fn test_run_without_path_prints_usage() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = super::run(["ops-extract"], &mut out, &mut err).unwrap();
        assert_eq!(code, USAGE_EXIT_CODE);
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "Usage: ops-extract BOOK_PROGRAM_FILE_PATH\n");
    }

    #[test]
    fn test_run_with_two_paths_opens_nothing() {
        // Both paths are missing; a file access would surface as Err.
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = super::run(["ops-extract", "/no/such/a.txt", "/no/such/b.txt"], &mut out, &mut err).unwrap();
        assert_eq!(code, USAGE_EXIT_CODE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_hyphenated_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("-dump.txt");
        std::fs::write(&path, "ops\n  type: \"relu\"\n").unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = super::run([std::ffi::OsString::from("ops-extract"), path.into_os_string()], &mut out, &mut err).unwrap();
        assert_eq!(code, 0);
        assert_eq!(out, b"relu\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_reads_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("program.txt");
        std::fs::write(&path, "ops\n  type: \"elementwise_add\"\n").unwrap();
        let mut out = Vec::new();
        assert_eq!(extract_ops_from_file(&path, &mut out).unwrap(), 1);
        assert_eq!(out, b"elementwise_add\n");
    }
}
