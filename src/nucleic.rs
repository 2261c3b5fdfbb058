use crate::error::ToolError;
use crate::tables;
use serde::Deserialize;
use std::str::FromStr;

/// The transforms which can be applied to a DNA or RNA sequence.
#[derive(clap::ValueEnum, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum NaCommand {
    /// DNA to RNA (T becomes U)
    Transcribe,

    /// reverse the order of the bases
    Reverse,

    /// Watson-Crick complement of a DNA sequence
    Complement,

    /// complement, then reverse
    #[value(name = "reverse_complement")]
    ReverseComplement,

    /// RNA to DNA (U becomes T)
    #[value(name = "reverse_transcription")]
    ReverseTranscription,

    /// translate an RNA sequence with the standard genetic code
    Protein,
}

const NA_COMMANDS: &str =
    "transcribe, reverse, complement, reverse_complement, reverse_transcription, protein";

impl FromStr for NaCommand {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "transcribe" => Ok(NaCommand::Transcribe),
            "reverse" => Ok(NaCommand::Reverse),
            "complement" => Ok(NaCommand::Complement),
            "reverse_complement" => Ok(NaCommand::ReverseComplement),
            "reverse_transcription" => Ok(NaCommand::ReverseTranscription),
            "protein" => Ok(NaCommand::Protein),
            _ => Err(ToolError::InvalidOption {
                kind: "nucleic acid command",
                name: s.to_string(),
                expected: NA_COMMANDS,
            }),
        }
    }
}

impl TryFrom<String> for NaCommand {
    type Error = ToolError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl NaCommand {
    /// Applies this command to a single, already validated, sequence. `Ok(None)` means the
    /// sequence was not suitable for the command and has been reported.
    pub fn apply(self, seq: &str) -> Result<Option<String>, ToolError> {
        let out = match self {
            NaCommand::Transcribe => transcribe(seq),
            NaCommand::Reverse => Some(reverse(seq)),
            NaCommand::Complement => Some(complement(seq)?),
            NaCommand::ReverseComplement => Some(reverse_complement(seq)?),
            NaCommand::ReverseTranscription => reverse_transcribe(seq),
            NaCommand::Protein => to_protein(seq),
        };
        Ok(out)
    }
}

pub fn is_dna(seq: &str) -> bool {
    tables::DNA.is_word(seq.bytes())
}

pub fn is_rna(seq: &str) -> bool {
    tables::RNA.is_word(seq.bytes())
}

fn report_invalid(seq: &str, expected: &str) {
    warn!("Sequence `{seq}` is not a valid {expected} sequence, skipping");
}

/// DNA to RNA. Case is preserved.
pub fn transcribe(seq: &str) -> Option<String> {
    if !is_dna(seq) {
        report_invalid(seq, "DNA");
        return None;
    }

    Some(
        seq.chars()
            .map(|b| match b {
                'T' => 'U',
                't' => 'u',
                b => b,
            })
            .collect(),
    )
}

/// RNA to DNA. Case is preserved.
pub fn reverse_transcribe(seq: &str) -> Option<String> {
    if !is_rna(seq) {
        report_invalid(seq, "RNA");
        return None;
    }

    Some(
        seq.chars()
            .map(|b| match b {
                'U' => 'T',
                'u' => 't',
                b => b,
            })
            .collect(),
    )
}

pub fn reverse(seq: &str) -> String {
    seq.chars().rev().collect()
}

fn complement_base(b: char) -> Option<char> {
    let c = match b {
        'A' => 'T',
        'a' => 't',
        'T' => 'A',
        't' => 'a',
        'C' => 'G',
        'c' => 'g',
        'G' => 'C',
        'g' => 'c',
        _ => return None,
    };
    Some(c)
}

/// Watson-Crick complement. Only defined for DNA: any other base (including U) is an error.
pub fn complement(seq: &str) -> Result<String, ToolError> {
    seq.chars()
        .map(complement_base)
        .collect::<Option<String>>()
        .ok_or_else(|| ToolError::NoComplement {
            seq: seq.to_string(),
        })
}

pub fn reverse_complement(seq: &str) -> Result<String, ToolError> {
    Ok(reverse(&complement(seq)?))
}

/// Translates consecutive codons of an RNA sequence. A trailing partial codon is dropped.
/// Returns `None` if nothing could be translated.
pub fn to_protein(seq: &str) -> Option<String> {
    if !is_rna(seq) {
        report_invalid(seq, "RNA");
        return None;
    }

    let protein: String = seq
        .as_bytes()
        .chunks_exact(3)
        .filter_map(tables::translate_codon)
        .collect();

    (!protein.is_empty()).then_some(protein)
}

/// Applies `command` to every sequence which is valid DNA or RNA, after trimming surrounding
/// whitespace. Invalid sequences and empty results are left out, so the output may be
/// shorter than the input; the relative order is kept.
///
/// # Errors
///
/// Returns `ToolError::NoComplement` if a complement is requested for an RNA sequence.
pub fn transform<S: AsRef<str>>(
    sequences: &[S],
    command: NaCommand,
) -> Result<Vec<String>, ToolError> {
    let mut results = Vec::with_capacity(sequences.len());

    for seq in sequences.iter().map(|s| s.as_ref().trim()) {
        if !(is_dna(seq) || is_rna(seq)) {
            report_invalid(seq, "DNA or RNA");
            continue;
        }

        match command.apply(seq)? {
            Some(out) if !out.is_empty() => results.push(out),
            _ => debug!("No {command:?} result for `{seq}`"),
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_complement_example() {
        assert_eq!(
            transform(&["ATGC"], NaCommand::ReverseComplement).unwrap(),
            vec!["GCAT"]
        );
    }

    #[test]
    fn complement_twice_is_identity() {
        for s in ["ATGC", "aatTGgc", "GGGG", "t"] {
            assert_eq!(complement(&complement(s).unwrap()).unwrap(), s);
        }
        assert_eq!(complement("AtGc").unwrap(), "TaCg");
    }

    #[test]
    fn reverse_twice_is_identity() {
        for s in ["ATGC", "aatTGgc", "AUGGCu"] {
            assert_eq!(reverse(&reverse(s)), s);
        }
        assert_eq!(reverse("AACG"), "GCAA");
    }

    #[test]
    fn transcription_round_trip() {
        for s in ["ATGC", "aTtGcA", "CCGG"] {
            let rna = transcribe(s).unwrap();
            assert_eq!(reverse_transcribe(&rna).unwrap(), s);
        }
        assert_eq!(transcribe("AtTc").unwrap(), "AuUc");
    }

    #[test]
    fn transcribe_rejects_rna() {
        assert_eq!(transcribe("AUG"), None);
        assert_eq!(reverse_transcribe("ATG"), None);
    }

    #[test]
    fn complement_of_rna_is_an_error() {
        assert_eq!(
            complement("AUG"),
            Err(ToolError::NoComplement {
                seq: "AUG".to_string()
            })
        );
        assert!(transform(&["ACG", "AUG"], NaCommand::Complement).is_err());
    }

    #[test]
    fn translation_drops_partial_codon() {
        assert_eq!(to_protein("AUGGCUUAAGC").unwrap(), "MA.");
        assert_eq!(to_protein("augugg").unwrap(), "MW");
        assert_eq!(to_protein("AU"), None);
        assert_eq!(to_protein("ATG"), None);
    }

    #[test]
    fn invalid_sequences_are_dropped() {
        let seqs = ["ATGC", "ATGU", "hello", "  ttaa\n", ""];
        let out = transform(&seqs, NaCommand::Reverse).unwrap();
        assert_eq!(out, vec!["CGTA", "aatt"]);
    }

    #[test]
    fn unsuitable_sequences_are_dropped() {
        let out = transform(&["AUG", "ATG", "ACG"], NaCommand::Transcribe).unwrap();
        assert_eq!(out, vec!["AUG", "ACG"]);

        let out = transform(&["AUGUGG", "ATGTGG", "AU"], NaCommand::Protein).unwrap();
        assert_eq!(out, vec!["MW"]);
    }

    #[test]
    fn command_names() {
        assert_eq!(
            "Reverse_Complement".parse::<NaCommand>().unwrap(),
            NaCommand::ReverseComplement
        );
        assert_eq!(
            "protein".parse::<NaCommand>().unwrap(),
            NaCommand::Protein
        );
        assert!(matches!(
            "translate".parse::<NaCommand>(),
            Err(ToolError::InvalidOption { .. })
        ));
    }
}
