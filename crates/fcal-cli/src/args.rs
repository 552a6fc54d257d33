//! Command-line argument definitions for the FCAL CLI.

use clap::{Parser, ValueEnum};

/// What the translator writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Emit {
    /// C++ code for the `Matrix` runtime
    #[default]
    Cpp,
    /// The program reprinted as canonical FCAL
    Fcal,
}

/// Command-line arguments for the FCAL translator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input FCAL file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output form
    #[arg(long, value_enum, default_value_t = Emit::Cpp)]
    pub emit: Emit,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["fcal", "prog.fcal"]).unwrap();
        assert_eq!(args.input, "prog.fcal");
        assert_eq!(args.output, None);
        assert_eq!(args.emit, Emit::Cpp);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "fcal",
            "prog.fcal",
            "-o",
            "prog.cpp",
            "--emit",
            "fcal",
            "-c",
            "fcal.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.output.as_deref(), Some("prog.cpp"));
        assert_eq!(args.emit, Emit::Fcal);
        assert_eq!(args.config.as_deref(), Some("fcal.toml"));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_rejects_unknown_emit() {
        assert!(Args::try_parse_from(["fcal", "prog.fcal", "--emit", "svg"]).is_err());
    }
}
