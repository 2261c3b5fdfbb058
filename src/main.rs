extern crate env_logger;
#[macro_use]
extern crate log;
use std::{
    fs::File,
    io::{prelude::*, stdout, BufWriter},
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod dispatch;
mod error;
mod fasta;
mod fastq;
mod nucleic;
mod protein;
mod tables;

use cli::{Cli, Commands};
use protein::ProteinOutput;

/// Creates a `BufWriter` for the given output option. This allows for an output file to be passed
/// or otherwise will default to using standard output.
fn get_writer(output: &Option<String>) -> Result<impl Write> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}

/// Prints protein results: one value per line, or `<seq>\t<mass>` lines for selections.
fn write_protein_output(writer: &mut impl Write, output: &ProteinOutput) -> std::io::Result<()> {
    match output {
        ProteinOutput::Properties(values) => {
            for v in values {
                writeln!(writer, "{v}")?;
            }
        }
        ProteinOutput::Selection(selection) => write!(writer, "{selection}")?,
        ProteinOutput::HeavyLight { heavy, light } => {
            write!(writer, "# heavy\n{heavy}# light\n{light}")?;
        }
    }
    Ok(())
}

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    debug!("bioinforma v{}", cli::VERSION);

    match &cli.command {
        Commands::Na { command, sequences } => {
            let results = nucleic::transform(sequences, *command)?;

            let mut writer = get_writer(&None)?;
            for seq in results {
                writeln!(writer, "{seq}")?;
            }
            writer.flush()?;
        }
        Commands::Protein { option, sequences } => {
            let output = protein::compute(sequences, *option);

            let mut writer = get_writer(&None)?;
            write_protein_output(&mut writer, &output)?;
            writer.flush()?;
        }
        Commands::Fastq {
            input,
            output,
            gc,
            len,
            quality,
        } => {
            let opts = fastq::FilterOpts {
                gc_bounds: *gc,
                length_bounds: *len,
                quality_threshold: *quality,
            };

            let reads = fastq::read_fastq(input)?;
            let kept = fastq::filter_reads(reads, &opts)?;

            let mut writer = get_writer(output)?;
            fastq::write_reads(&mut writer, &kept)?;
            writer.flush()?;
        }
        Commands::FastaOneline { input, output } => {
            let path = fasta::convert_to_oneline(input, output.as_deref())?;
            info!("Completed conversion to {path}");
        }
        Commands::Run { request } => {
            let json = std::fs::read_to_string(request)
                .with_context(|| format!("Unable to read request file {request}"))?;
            let request = dispatch::parse_request(&json).context("Invalid request")?;
            let response = dispatch::dispatch(request)?;

            let mut writer = get_writer(&None)?;
            serde_json::to_writer_pretty(&mut writer, &response)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
