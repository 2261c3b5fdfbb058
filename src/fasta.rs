use anyhow::{Context, Result};
use needletail::{parser::FastaReader, FastxReader};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Rewrites every FASTA record so that its sequence is on a single line. Returns the number
/// of records written.
pub fn join_records<R: Read + Send>(reader: R, writer: &mut impl Write) -> Result<usize> {
    let mut fasta_reader = FastaReader::new(reader);
    let mut count = 0;

    while let Some(rec) = fasta_reader.next() {
        let rec = rec.context("Invalid FASTA record")?;

        // needletail strips the line breaks from the sequence for us
        writer.write_all(b">")?;
        writer.write_all(rec.id())?;
        writer.write_all(b"\n")?;
        writer.write_all(&rec.seq())?;
        writer.write_all(b"\n")?;

        count += 1;
    }

    Ok(count)
}

/// The path the converted file is written to: `output` with a `.fasta` extension enforced,
/// or `<input stem>_oneline.fasta` next to the input.
pub fn output_path(input: &str, output: Option<&str>) -> String {
    match output {
        Some(o) if o.ends_with(".fasta") => o.to_string(),
        Some(o) => format!("{o}.fasta"),
        None => {
            let path = Path::new(input);
            let stem = path
                .file_stem()
                .map_or_else(|| input.into(), |s| s.to_string_lossy());
            path.with_file_name(format!("{stem}_oneline.fasta"))
                .to_string_lossy()
                .into_owned()
        }
    }
}

/// Converts a multi-line FASTA file into a one-line-per-sequence FASTA file, returning the
/// path that was written.
pub fn convert_to_oneline(input: &str, output: Option<&str>) -> Result<String> {
    let out_path = output_path(input, output);

    let file = File::open(input).with_context(|| format!("Unable to open file {input}"))?;
    let mut writer = BufWriter::new(
        File::create(&out_path).with_context(|| format!("Unable to create file {out_path}"))?,
    );

    let count = join_records(file, &mut writer)
        .with_context(|| format!("Unable to convert {input}"))?;
    writer.flush()?;

    info!("Wrote {count} records to {out_path}");
    Ok(out_path)
}
