use crate::error::ToolError;
use crate::tables::{self, Charge};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Average mass of a single residue, in Daltons.
pub const RESIDUE_MASS: usize = 110;

/// Upper bound on the number of 0.1 pH steps taken by the isoelectric point search.
pub const MAX_PH_STEPS: usize = 1000;

/// The calculations available on a set of protein sequences.
#[derive(clap::ValueEnum, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum ProteinOption {
    /// grand average of hydropathy
    Gravy,

    /// approximate isoelectric point
    Iso,

    /// three letter residue codes, separated by hyphens
    Rename,

    /// number of residues
    Lengths,

    /// approximate molecular weight (110 Da per residue)
    Molw,

    /// the longest sequences
    Heavy,

    /// the shortest sequences
    Light,

    /// both the longest and the shortest sequences
    #[value(name = "heavy_light")]
    HeavyLight,
}

const PROTEIN_OPTIONS: &str = "gravy, iso, rename, lengths, molw, heavy, light, heavy_light";

impl FromStr for ProteinOption {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gravy" => Ok(ProteinOption::Gravy),
            "iso" => Ok(ProteinOption::Iso),
            "rename" => Ok(ProteinOption::Rename),
            "lengths" => Ok(ProteinOption::Lengths),
            "molw" => Ok(ProteinOption::Molw),
            "heavy" => Ok(ProteinOption::Heavy),
            "light" => Ok(ProteinOption::Light),
            "heavy_light" => Ok(ProteinOption::HeavyLight),
            _ => Err(ToolError::InvalidOption {
                kind: "protein option",
                name: s.to_string(),
                expected: PROTEIN_OPTIONS,
            }),
        }
    }
}

impl TryFrom<String> for ProteinOption {
    type Error = ToolError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A single per-sequence result.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Property {
    Value(f64),
    Count(usize),
    Text(String),
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Value(v) => write!(f, "{v}"),
            Property::Count(n) => write!(f, "{n}"),
            Property::Text(s) => f.write_str(s),
        }
    }
}

/// A set of sequences sharing the same (extreme) length, and the mass of each of them.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Selection {
    pub sequences: Vec<String>,
    pub mass: usize,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seq in self.sequences.iter() {
            writeln!(f, "{}\t{}", seq, self.mass)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ProteinOutput {
    Properties(Vec<Property>),
    Selection(Selection),
    HeavyLight { heavy: Selection, light: Selection },
}

/// Fixed-order count of the ionisable residues of a sequence, see `tables::CHARGED_RESIDUES`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeTally([usize; 7]);

impl ChargeTally {
    pub fn new(seq: &[u8]) -> Self {
        let mut counts = [0; 7];
        for aa in seq {
            if let Some(i) = tables::CHARGED_RESIDUES.iter().position(|(r, ..)| r == aa) {
                counts[i] += 1;
            }
        }
        ChargeTally(counts)
    }

    /// Approximate net charge at `ph`, by Henderson-Hasselbalch over the termini and the
    /// ionisable side chains.
    pub fn net_charge(&self, ph: f64) -> f64 {
        let n_terminus = 1.0 / (1.0 + 10_f64.powf(ph - tables::PKA_N_TERMINUS));
        let c_terminus = -1.0 / (1.0 + 10_f64.powf(tables::PKA_C_TERMINUS - ph));

        let side_chains: f64 = tables::CHARGED_RESIDUES
            .iter()
            .zip(self.0.iter())
            .map(|(&(_, pka, charge), &n)| {
                let n = n as f64;
                match charge {
                    Charge::Positive => n / (1.0 + 10_f64.powf(ph - pka)),
                    Charge::Negative => -n / (1.0 + 10_f64.powf(pka - ph)),
                }
            })
            .sum();

        n_terminus + c_terminus + side_chains
    }

    /// Steps up from pH 0 in increments of 0.1 and returns the first pH at which the net
    /// charge is no longer positive, along with the number of steps taken. `None` if the
    /// charge is still positive after `max_steps`.
    pub fn search_neutral_ph(&self, max_steps: usize) -> Option<(f64, usize)> {
        (0..=max_steps)
            .map(|step| (step as f64 / 10.0, step))
            .find(|&(ph, _)| self.net_charge(ph) <= 0.0)
    }
}

/// Rounds to `decimals` places, sending exact halves to the even digit.
fn round_to(v: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (v * factor).round_ties_even() / factor
}

/// Upper cases `seq` and checks it against the 20 amino acid alphabet. Empty sequences are
/// rejected too. Invalid sequences are reported and `None` is returned.
pub fn validate(seq: &str) -> Option<String> {
    let upper = seq.to_ascii_uppercase();
    if upper.is_empty() || !tables::AMINO_ACIDS.is_word(upper.bytes()) {
        warn!("Sequence `{seq}` is not a valid protein sequence, skipping");
        return None;
    }
    Some(upper)
}

/// Grand average of hydropathy, to 3 decimal places.
pub fn gravy(seq: &[u8]) -> f64 {
    let total: f64 = seq.iter().filter_map(|&aa| tables::hydropathy(aa)).sum();
    round_to(total / seq.len() as f64, 3)
}

/// Approximate isoelectric point, to 1 decimal place.
pub fn isoelectric_point(seq: &[u8]) -> f64 {
    let tally = ChargeTally::new(seq);
    match tally.search_neutral_ph(MAX_PH_STEPS) {
        Some((ph, _)) => round_to(ph, 1),
        None => {
            let ph = MAX_PH_STEPS as f64 / 10.0;
            warn!("Net charge still positive at pH {ph}, giving up on the isoelectric point");
            ph
        }
    }
}

/// Hyphen-joined three letter codes, e.g. `AC` becomes `Ala-Cys`.
pub fn three_letter_name(seq: &[u8]) -> String {
    seq.iter()
        .filter_map(|&aa| tables::three_letter(aa))
        .join("-")
}

pub fn molecular_weight(seq: &[u8]) -> usize {
    seq.len() * RESIDUE_MASS
}

fn heaviest(sequences: &[String]) -> Selection {
    let sequences = sequences.iter().max_set_by_key(|s| s.len());
    to_selection(sequences)
}

fn lightest(sequences: &[String]) -> Selection {
    let sequences = sequences.iter().min_set_by_key(|s| s.len());
    to_selection(sequences)
}

fn per_sequence(passed: &[String], f: impl Fn(&[u8]) -> Property) -> ProteinOutput {
    ProteinOutput::Properties(passed.iter().map(|s| f(s.as_bytes())).collect())
}

fn to_selection(sequences: Vec<&String>) -> Selection {
    let mass = sequences
        .first()
        .map_or(0, |s| molecular_weight(s.as_bytes()));
    Selection {
        sequences: sequences.into_iter().cloned().collect(),
        mass,
    }
}

/// Runs `option` over every valid sequence. Invalid sequences are reported and left out.
///
/// The heavy and light selections keep every sequence which shares the extreme length, in
/// input order. A single valid sequence is both the heaviest and the lightest.
pub fn compute<S: AsRef<str>>(sequences: &[S], option: ProteinOption) -> ProteinOutput {
    let passed: Vec<String> = sequences
        .iter()
        .filter_map(|s| validate(s.as_ref()))
        .collect();

    debug!(
        "{} of {} protein sequences passed validation",
        passed.len(),
        sequences.len()
    );

    match option {
        ProteinOption::Gravy => per_sequence(&passed, |s| Property::Value(gravy(s))),
        ProteinOption::Iso => per_sequence(&passed, |s| Property::Value(isoelectric_point(s))),
        ProteinOption::Rename => per_sequence(&passed, |s| Property::Text(three_letter_name(s))),
        ProteinOption::Lengths => per_sequence(&passed, |s| Property::Count(s.len())),
        ProteinOption::Molw => per_sequence(&passed, |s| Property::Count(molecular_weight(s))),
        ProteinOption::Heavy => ProteinOutput::Selection(heaviest(&passed)),
        ProteinOption::Light => ProteinOutput::Selection(lightest(&passed)),
        ProteinOption::HeavyLight => ProteinOutput::HeavyLight {
            heavy: heaviest(&passed),
            light: lightest(&passed),
        },
    }
}
