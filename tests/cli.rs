use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const BINARY: &str = "bioinforma";
const SAMPLE_FASTQ: &str = "tests/data/sample.fastq";
const SAMPLE_FASTA: &str = "tests/data/multiline.fasta";

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn na_reverse_complement() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["na", "reverse_complement", "ATGC"])
        .assert()
        .success()
        .stdout("GCAT\n");

    Ok(())
}

#[test]
fn na_command_ignores_case() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["na", "Reverse_Complement", "ATGC"])
        .assert()
        .success()
        .stdout("GCAT\n");

    Ok(())
}

#[test]
fn na_skips_invalid_sequences() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["na", "protein", "AUGUGG", "ATGTGG", "hello"])
        .assert()
        .success()
        .stdout("MW\n")
        .stderr(predicate::str::contains("hello"));

    Ok(())
}

#[test]
fn na_complement_of_rna_fails() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["na", "complement", "AUG"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot take the complement"));

    Ok(())
}

#[test]
fn protein_molw() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["protein", "molw", "A", "ac"])
        .assert()
        .success()
        .stdout("110\n220\n");

    Ok(())
}

#[test]
fn protein_heavy_light() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["protein", "heavy_light", "AAA", "CC", "GGG", "D"])
        .assert()
        .success()
        .stdout("# heavy\nAAA\t330\nGGG\t330\n# light\nD\t110\n");

    Ok(())
}

#[test]
fn protein_unknown_option() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["protein", "weight", "AAA"])
        .assert()
        .failure();

    Ok(())
}

#[test]
fn fastq_default_filter() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["fastq", SAMPLE_FASTQ])
        .assert()
        .success()
        .stdout(predicate::str::contains("@read1 high gc"))
        .stdout(predicate::str::contains("@read2 low quality"))
        .stdout(predicate::str::contains("@read3").not())
        .stdout(predicate::str::contains("@read4 long"));

    Ok(())
}

#[test]
fn fastq_filter_to_file() -> TestResult {
    let temp = assert_fs::NamedTempFile::new("filtered.fastq")?;

    Command::cargo_bin(BINARY)?
        .args(["fastq", SAMPLE_FASTQ, "--quality", "10", "--len", "0,10", "-o"])
        .arg(temp.path())
        .assert()
        .success();

    temp.assert("@read1 high gc\nGCGCGCAT\n+\nIIIIIIII\n");
    temp.close()?;

    Ok(())
}

#[test]
fn fastq_file_doesnt_exist() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["fastq", "file_which_does_not_exist.fastq"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file or directory"));

    Ok(())
}

#[test]
fn fasta_oneline() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let output = temp.child("joined.fasta");

    Command::cargo_bin(BINARY)?
        .args(["fasta-oneline", SAMPLE_FASTA, "-o"])
        .arg(temp.child("joined").path())
        .assert()
        .success();

    output.assert(">seq1 first record\nATGCATGCATGC\n>seq2\nMKVLLAGGCC\n");
    temp.close()?;

    Ok(())
}

#[test]
fn run_request() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["run", "tests/data/request_na.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"na\""))
        .stdout(predicate::str::contains("CGTA"))
        .stdout(predicate::str::contains("AAUUCGGUA"));

    Ok(())
}

#[test]
fn run_request_with_invalid_option() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["run", "tests/data/request_bad.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid protein option `weight`"));

    Ok(())
}
