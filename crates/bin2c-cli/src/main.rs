//! bin2c - Embed binary files into a C header as byte arrays
//!
//! Typically run as a build step after compiling shaders:
//!
//! ```text
//! bin2c QuadVS.cso QuadPS.cso -o shaders.h
//! ```
//!
//! Every token before `-o` is an input path, even one starting with `-`.
//! Layout and logging are tuned through `BIN2C_COLUMNS` and `BIN2C_VERBOSE`.

use anyhow::{Context, Result};
use bin2c_core::{EmitReport, Embedder, Error, HeaderConfig, DEFAULT_BYTES_PER_LINE};
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: bin2c input_file1 input_file2 ... -o output_file";

/// Embed binary files into a C header as byte arrays
#[derive(Parser, Debug)]
#[command(name = "bin2c")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "bin2c <INPUT>... -o <OUTPUT>")]
#[command(after_help = "Environment:\n  \
    BIN2C_COLUMNS  byte literals per line [default: 12]\n  \
    BIN2C_VERBOSE  log level 0-3 [default: 0]\n  \
    RUST_LOG       additional tracing filter directives")]
struct Cli {
    /// Input files to embed, in declaration order
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Header file to generate (created or replaced)
    #[arg(short = 'o', value_name = "OUTPUT", required = true)]
    output: PathBuf,

    /// Number of byte literals per line
    #[arg(long, hide = true, env = "BIN2C_COLUMNS", default_value_t = DEFAULT_BYTES_PER_LINE)]
    columns: usize,

    /// Verbosity level (0-3)
    #[arg(long, hide = true, env = "BIN2C_VERBOSE", default_value_t = 0)]
    verbose: u8,
}

fn main() -> ExitCode {
    ExitCode::from(execute(std::env::args_os().collect()))
}

/// Runs one invocation and returns the process exit status.
fn execute(args: Vec<OsString>) -> u8 {
    let tokens = args.get(1..).unwrap_or_default();

    if check_shape(tokens).is_err() {
        println!("{USAGE}");
        return 1;
    }

    let cli = match Cli::try_parse_from(normalize_args(&args)) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            e.print().ok();
            println!("{USAGE}");
            return 1;
        }
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            if report.unchanged {
                debug!("Output already up to date: {}", report.output.display());
            }
            println!("Conversion successful. Output file: {}", report.output.display());
            0
        }
        Err(e) => {
            println!("Error: {e:#}");
            1
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Returns true for a lone help or version request
fn wants_info(args: &[OsString]) -> bool {
    args.len() == 1 && matches!(args[0].to_str(), Some("-h" | "--help" | "-V" | "--version"))
}

/// Checks the `<input>... -o <output>` shape: at least three tokens, with
/// `-o` immediately before the final one. Help and version requests are
/// left to clap.
fn check_shape(args: &[OsString]) -> bin2c_core::Result<()> {
    if wants_info(args) {
        return Ok(());
    }
    if args.len() < 3 {
        return Err(Error::usage("expected at least one input, -o and an output"));
    }
    if args[args.len() - 2] != "-o" {
        return Err(Error::usage("-o must come right before the output file"));
    }
    Ok(())
}

/// Rewrites a shape-checked command line as `bin2c -o <output> -- <input>...`
/// so clap takes every input token literally.
fn normalize_args(args: &[OsString]) -> Vec<OsString> {
    let tokens = args.get(1..).unwrap_or_default();
    if wants_info(tokens) || tokens.len() < 3 {
        return args.to_vec();
    }

    let (inputs, tail) = tokens.split_at(tokens.len() - 2);
    let mut normalized = Vec::with_capacity(args.len() + 1);
    normalized.push(args[0].clone());
    normalized.push(OsString::from("-o"));
    normalized.push(tail[1].clone());
    normalized.push(OsString::from("--"));
    normalized.extend(inputs.iter().cloned());
    normalized
}

fn run(cli: &Cli) -> Result<EmitReport> {
    debug!(
        "Embedding {} input(s) into {}",
        cli.inputs.len(),
        cli.output.display()
    );

    Embedder::new()
        .config(HeaderConfig::new().bytes_per_line(cli.columns))
        .emit_header(&cli.inputs, &cli.output)
        .with_context(|| format!("failed to generate {}", cli.output.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_args(&os_args(args))).unwrap()
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_shape_accepts_canonical_form() {
        assert!(check_shape(&os_args(&["a.cso", "-o", "out.h"])).is_ok());
        assert!(check_shape(&os_args(&["a.cso", "b.cso", "-o", "out.h"])).is_ok());
        assert!(check_shape(&os_args(&["-v", "a.cso", "-o", "out.h"])).is_ok());
    }

    #[test]
    fn test_shape_rejects_malformed() {
        assert!(check_shape(&os_args(&[])).is_err());
        assert!(check_shape(&os_args(&["-o", "out.h"])).is_err());
        assert!(check_shape(&os_args(&["a.cso", "out.h"])).is_err());
        assert!(check_shape(&os_args(&["a.cso", "b.cso", "out.h"])).is_err());
        assert!(check_shape(&os_args(&["-o", "out.h", "a.cso"])).is_err());
    }

    #[test]
    fn test_shape_error_is_usage() {
        let err = check_shape(&os_args(&["a.cso", "out.h"])).unwrap_err();
        assert_eq!(err.kind(), bin2c_core::ErrorKind::Usage);
        assert!(check_shape(&os_args(&["--help"])).is_ok());
    }

    #[test]
    fn test_wants_info() {
        assert!(wants_info(&os_args(&["--help"])));
        assert!(wants_info(&os_args(&["-V"])));
        assert!(!wants_info(&os_args(&["a.cso", "-o", "out.h"])));
        assert!(!wants_info(&os_args(&["--help", "-o", "out.h"])));
    }

    #[test]
    fn test_parse_inputs_and_output() {
        let cli = parse(&["bin2c", "a.cso", "b.cso", "-o", "out.h"]);
        assert_eq!(cli.inputs, vec![PathBuf::from("a.cso"), PathBuf::from("b.cso")]);
        assert_eq!(cli.output, PathBuf::from("out.h"));
    }

    #[test]
    fn test_parse_hyphen_inputs_are_paths() {
        let cli = parse(&["bin2c", "-dash.bin", "-o", "y.h"]);
        assert_eq!(cli.inputs, vec![PathBuf::from("-dash.bin")]);
        assert_eq!(cli.output, PathBuf::from("y.h"));

        let cli = parse(&["bin2c", "-v", "--columns", "-o", "y.h"]);
        assert_eq!(
            cli.inputs,
            vec![PathBuf::from("-v"), PathBuf::from("--columns")]
        );
    }

    #[test]
    fn test_parse_requires_input() {
        assert!(Cli::try_parse_from(["bin2c", "-o", "out.h"]).is_err());
    }

    #[test]
    fn test_malformed_invocation_leaves_output_untouched() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.cso");
        fs::write(&input, [1, 2]).unwrap();
        let output = dir.path().join("shaders.h");
        fs::write(&output, "previous").unwrap();

        let input = input.to_str().unwrap();
        let out = output.to_str().unwrap();

        assert_eq!(execute(os_args(&["bin2c", input, out])), 1);
        assert_eq!(execute(os_args(&["bin2c", "-o", out, input])), 1);
        assert_eq!(execute(os_args(&["bin2c", "-o", out])), 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_execute_generates_header() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("-dash.bin");
        fs::write(&input, [0xAB]).unwrap();
        let output = dir.path().join("dash.h");

        let status = execute(os_args(&[
            "bin2c",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]));

        assert_eq!(status, 0);
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("unsigned char -dash[] = {\n    0xAB, };"));
    }

    #[test]
    fn test_run_generates_header() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("QuadVS.cso");
        fs::write(&input, [0x44, 0x58, 0x42, 0x43]).unwrap();
        let output = dir.path().join("shaders.h");

        let cli = Cli {
            inputs: vec![input],
            output: output.clone(),
            columns: DEFAULT_BYTES_PER_LINE,
            verbose: 0,
        };
        let report = run(&cli).unwrap();

        assert_eq!(report.arrays, 1);
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("unsigned char QuadVS[] = {\n    0x44, 0x58, 0x42, 0x43, };"));
        assert!(text.contains("unsigned int QuadVS_size = 4;"));
    }

    #[test]
    fn test_run_reports_missing_input() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.cso");
        fs::write(&good, [1]).unwrap();
        let output = dir.path().join("shaders.h");

        let cli = Cli {
            inputs: vec![good, dir.path().join("missing.cso")],
            output: output.clone(),
            columns: DEFAULT_BYTES_PER_LINE,
            verbose: 0,
        };
        let err = run(&cli).unwrap_err();

        assert!(format!("{err:#}").contains("file not found"));
        assert!(!output.exists());
    }
}
