use crate::fastq::{self, FilterOpts, Reads};
use crate::nucleic::{self, NaCommand};
use crate::protein::{self, ProteinOption, ProteinOutput};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A request to one of the three tools, tagged by the kind of sequence it carries.
///
/// ```json
/// {"type": "na", "sequences": ["ATGC"], "command": "reverse_complement"}
/// {"type": "protein", "sequences": ["MKV"], "option": "iso"}
/// {"type": "fastq", "input": "reads.fastq", "gc_bounds": [20, 80]}
/// ```
#[derive(Deserialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Request {
    Na {
        sequences: Vec<String>,
        command: NaCommand,
    },
    Protein {
        sequences: Vec<String>,
        option: ProteinOption,
    },
    Fastq {
        /// path of the .fastq file to filter
        input: String,
        #[serde(flatten)]
        opts: FilterOpts,
    },
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "type", content = "result", rename_all = "lowercase")]
pub enum Response {
    Na(Vec<String>),
    Protein(ProteinOutput),
    Fastq(Reads),
}

pub fn dispatch(request: Request) -> Result<Response> {
    let response = match request {
        Request::Na {
            sequences,
            command,
        } => Response::Na(nucleic::transform(&sequences, command)?),
        Request::Protein { sequences, option } => {
            Response::Protein(protein::compute(&sequences, option))
        }
        Request::Fastq { input, opts } => {
            let reads = fastq::read_fastq(&input)?;
            Response::Fastq(fastq::filter_reads(reads, &opts)?)
        }
    };
    Ok(response)
}

/// Parses a JSON request. Unknown commands and options are reported with the list of valid
/// names.
pub fn parse_request(json: &str) -> Result<Request> {
    Ok(serde_json::from_str(json)?)
}
