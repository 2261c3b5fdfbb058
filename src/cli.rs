use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::nucleic::NaCommand;
use crate::protein::ProteinOption;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 bioinforma version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   small tools for DNA, RNA, protein and FASTQ data";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transform DNA or RNA sequences
    #[command(arg_required_else_help = true)]
    Na {
        #[arg(value_enum, ignore_case = true)]
        command: NaCommand,

        /// the sequences. invalid sequences are skipped with a warning
        #[arg(required = true)]
        sequences: Vec<String>,
    },

    /// Compute properties of protein sequences
    #[command(arg_required_else_help = true)]
    Protein {
        #[arg(value_enum)]
        option: ProteinOption,

        /// the sequences, as one letter amino acid codes
        #[arg(required = true)]
        sequences: Vec<String>,
    },

    /// Filter the reads of a .fastq file by GC content, length and quality
    #[command(arg_required_else_help = true)]
    Fastq {
        /// the input .fastq file
        input: String,

        /// the output .fastq, or standard output if not given
        #[arg(short)]
        output: Option<String>,

        /// keep reads with a GC percentage strictly inside the interval (a,b).
        /// a is the minimum, and b is the maximum (both exclusive).
        /// alternatively, a can be `-inf` and b can be `inf`.
        #[arg(
            long,
            value_parser = |x: &str| Bounds::try_from(x),
            default_value = "0,100",
            verbatim_doc_comment
        )]
        gc: Bounds,

        /// keep reads with a length strictly inside the interval (a,b).
        /// see the docs for `--gc` for documentation on how to use the interval.
        #[arg(
            long,
            value_parser = |x: &str| Bounds::try_from(x),
            default_value = "0,4294967296",
            verbatim_doc_comment
        )]
        len: Bounds,

        /// keep reads with a mean PHRED quality strictly greater than this value
        #[arg(long, default_value_t = 0.0)]
        quality: f64,
    },

    /// Join multi-line FASTA records so that each sequence is on a single line
    #[command(name = "fasta-oneline", arg_required_else_help = true)]
    FastaOneline {
        /// the input .fasta file
        input: String,

        /// the output .fasta file. `.fasta` is appended if missing.
        /// defaults to `<input>_oneline.fasta`
        #[arg(short, verbatim_doc_comment)]
        output: Option<String>,
    },

    /// Run a JSON request file of the form `{"type": "na" | "protein" | "fastq", ...}`,
    /// writing the JSON response to standard output
    #[command(arg_required_else_help = true)]
    Run {
        /// the request file
        request: String,
    },
}

/// An open interval (low, high). Both ends are exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "(f64, f64)")]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl From<(f64, f64)> for Bounds {
    fn from((min, max): (f64, f64)) -> Self {
        Bounds { min, max }
    }
}

/// Error type for parsing a `low,high` bounds argument.
#[derive(Debug)]
pub struct ParseBoundsErr(String);

impl std::fmt::Display for ParseBoundsErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid bounds: {}", self.0)
    }
}

impl std::error::Error for ParseBoundsErr {}

/// Parses one end of a bounds argument. `inf` and `-inf` leave that end open.
fn parse_bound(s: &str, end: &str) -> Result<f64, ParseBoundsErr> {
    match s.trim().to_lowercase().as_str() {
        "inf" | "+inf" => Ok(f64::INFINITY),
        "-inf" => Ok(f64::NEG_INFINITY),
        v => v.parse::<f64>().map_err(|_| {
            ParseBoundsErr(format!("the {end} end `{}` is not a number", s.trim()))
        }),
    }
}

impl<'a> TryFrom<&'a str> for Bounds {
    type Error = ParseBoundsErr;

    fn try_from(arg: &'a str) -> Result<Bounds, Self::Error> {
        let (low, high) = arg
            .split_once(',')
            .filter(|(_, high)| !high.contains(','))
            .ok_or_else(|| {
                ParseBoundsErr(indoc::formatdoc! {"
                got '{arg}', but bounds are written as two numbers separated by a comma:
                  --gc 40,60      GC between 40% and 60%
                  --len 50,inf    reads longer than 50 bases
                "})
            })?;

        Ok(Bounds {
            min: parse_bound(low, "lower")?,
            max: parse_bound(high, "upper")?,
        })
    }
}

impl Bounds {
    /// Strict on both ends: a value equal to either bound is outside.
    pub fn contains(&self, v: f64) -> bool {
        (self.min < v) && (v < self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bounds() {
        let b = Bounds::try_from("20, 80").unwrap();
        assert_eq!(b, Bounds { min: 20.0, max: 80.0 });

        let b = Bounds::try_from("-inf,INF").unwrap();
        assert!(b.contains(-1e300) && b.contains(1e300));
    }

    #[test]
    fn parse_bounds_errors() {
        assert!(Bounds::try_from("20").is_err());
        assert!(Bounds::try_from("1,2,3").is_err());
        assert!(Bounds::try_from("a,2").is_err());
        assert!(Bounds::try_from("1,b").is_err());
    }

    #[test]
    fn exclusive_on_both_ends() {
        let b = Bounds { min: 0.0, max: 100.0 };
        assert!(!b.contains(0.0));
        assert!(!b.contains(100.0));
        assert!(b.contains(0.01));
        assert!(b.contains(99.99));
    }

    #[test]
    fn bounds_from_json_pair() {
        let b: Bounds = serde_json::from_str("[10, 20.5]").unwrap();
        assert_eq!(b, Bounds { min: 10.0, max: 20.5 });
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::try_parse_from([
            "bioinforma",
            "fastq",
            "in.fastq",
            "--gc",
            "20,80",
            "--quality",
            "30",
        ])
        .unwrap();

        match cli.command {
            Commands::Fastq { gc, len, quality, .. } => {
                assert_eq!(gc, Bounds { min: 20.0, max: 80.0 });
                assert_eq!(len.max, 4294967296.0);
                assert_eq!(quality, 30.0);
            }
            _ => panic!("expected the fastq subcommand"),
        }

        let cli = Cli::try_parse_from(["bioinforma", "na", "reverse_complement", "ATGC"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Na {
                command: NaCommand::ReverseComplement,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["bioinforma", "na", "Reverse_Complement", "ATGC"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Na {
                command: NaCommand::ReverseComplement,
                ..
            }
        ));
    }
}
