//! Static lookup data shared by the nucleic acid and protein tools.
//!
//! The alphabets and the codon table are built once on first use and never mutated. The
//! per-residue tables are hardcoded match statements.

use bio::alphabets::Alphabet;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Symbol used for the three stop codons.
pub const STOP: char = '.';

/// Standard genetic code in NCBI order (first base slowest), with `*` for stops.
const NCBI_STANDARD: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";
const NCBI_BASES: [u8; 4] = [b'U', b'C', b'A', b'G'];

lazy_static! {
    pub static ref DNA: Alphabet = Alphabet::new(b"agctAGCT");
    pub static ref RNA: Alphabet = Alphabet::new(b"agcuAGCU");
    pub static ref AMINO_ACIDS: Alphabet = Alphabet::new(b"ARNDVHGQEILKMPSYTWFC");

    /// The 64 RNA codons, upper case, mapped to a one-letter amino acid or `STOP`.
    pub static ref CODONS: HashMap<[u8; 3], char> = {
        let mut table = HashMap::with_capacity(64);
        let mut aas = NCBI_STANDARD.iter();

        for &b1 in &NCBI_BASES {
            for &b2 in &NCBI_BASES {
                for &b3 in &NCBI_BASES {
                    let aa = match aas.next() {
                        Some(b'*') | None => STOP,
                        Some(&aa) => aa as char,
                    };
                    table.insert([b1, b2, b3], aa);
                }
            }
        }

        table
    };
}

/// Translate a single codon, ignoring case. Returns `None` for anything which is not one
/// of the 64 RNA codons.
pub fn translate_codon(codon: &[u8]) -> Option<char> {
    let key: [u8; 3] = codon.try_into().ok()?;
    CODONS.get(&key.map(|b| b.to_ascii_uppercase())).copied()
}

/// Kyte-Doolittle hydropathy index of an upper case residue.
pub fn hydropathy(aa: u8) -> Option<f64> {
    let v = match aa {
        b'A' => 1.8,
        b'R' => -4.5,
        b'N' => -3.5,
        b'D' => -3.5,
        b'C' => 2.5,
        b'Q' => -3.5,
        b'E' => -3.5,
        b'G' => -0.4,
        b'H' => -3.2,
        b'I' => 4.5,
        b'L' => 3.8,
        b'K' => -3.9,
        b'M' => 1.9,
        b'F' => 2.8,
        b'P' => -1.6,
        b'S' => -0.8,
        b'T' => -0.7,
        b'W' => -0.9,
        b'Y' => -1.3,
        b'V' => 4.2,
        _ => return None,
    };
    Some(v)
}

/// Three letter code of an upper case residue.
pub fn three_letter(aa: u8) -> Option<&'static str> {
    let name = match aa {
        b'A' => "Ala",
        b'R' => "Arg",
        b'N' => "Asn",
        b'D' => "Asp",
        b'C' => "Cys",
        b'Q' => "Gln",
        b'E' => "Glu",
        b'G' => "Gly",
        b'H' => "His",
        b'I' => "Ile",
        b'L' => "Leu",
        b'K' => "Lys",
        b'M' => "Met",
        b'F' => "Phe",
        b'P' => "Pro",
        b'S' => "Ser",
        b'T' => "Thr",
        b'W' => "Trp",
        b'Y' => "Tyr",
        b'V' => "Val",
        _ => return None,
    };
    Some(name)
}

pub const PKA_N_TERMINUS: f64 = 8.2;
pub const PKA_C_TERMINUS: f64 = 3.65;

/// Whether a titratable group gains a proton (+1) or loses one (-1).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Charge {
    Positive,
    Negative,
}

/// Ionisable side chains, in tally order: residue, pKa, charge when ionised.
pub const CHARGED_RESIDUES: [(u8, f64, Charge); 7] = [
    (b'C', 8.18, Charge::Negative),
    (b'D', 3.9, Charge::Negative),
    (b'E', 4.07, Charge::Negative),
    (b'Y', 10.46, Charge::Negative),
    (b'H', 6.04, Charge::Positive),
    (b'K', 10.54, Charge::Positive),
    (b'R', 12.48, Charge::Positive),
];
