use std::fs;
use std::process::Command;

use tempfile::tempdir;
use urx_corelib::SweepReport;

const BIN: &str = env!("CARGO_BIN_EXE_urx");

#[test]
fn verify_prints_one_line_per_width() {
    let out = Command::new(BIN)
        .args(["verify", "--max-bits", "5"])
        .output()
        .expect("run verify");
    assert!(out.status.success(), "verify failed: {:?}", out);
    let stdout = String::from_utf8(out.stdout).expect("utf8 stdout");
    assert_eq!(stdout, "0 BITS\n1 BITS\n2 BITS\n3 BITS\n4 BITS\n");
}

#[test]
fn verify_reads_config_and_emits_json() {
    let dir = tempdir().unwrap();
    let cfg_path = dir.path().join("sweep.json");
    fs::write(&cfg_path, r#"{"min_bits": 3, "max_bits": 4}"#).expect("write config");

    let out = Command::new(BIN)
        .args(["verify", "--json", "--config", cfg_path.to_str().unwrap()])
        .output()
        .expect("run verify");
    assert!(out.status.success(), "verify failed: {:?}", out);
    let stdout = String::from_utf8(out.stdout).expect("utf8 stdout");
    let (progress, json) = stdout.split_once('\n').expect("progress line");
    assert_eq!(progress, "3 BITS");
    let report: SweepReport = serde_json::from_str(json).expect("parse report");
    assert_eq!(report.widths.len(), 1);
    assert_eq!(report.widths[0].bits, 3);
    assert_eq!(report.widths[0].factorizations, 55);
}

#[test]
fn verify_rejects_oversized_sweep() {
    let status = Command::new(BIN)
        .args(["verify", "--max-bits", "40"])
        .status()
        .expect("run verify");
    assert!(!status.success());
}

#[test]
fn extract_prints_output_and_leftover() {
    let simple = Command::new(BIN)
        .args(["extract", "--bits", "8", "-n", "6", "-x", "220"])
        .output()
        .expect("run extract");
    assert!(simple.status.success());
    assert_eq!(String::from_utf8_lossy(&simple.stdout), "5 40\n");

    let corrected = Command::new(BIN)
        .args(["extract", "--bits", "8", "-n", "6", "-x", "220", "--corrected"])
        .output()
        .expect("run extract");
    assert!(corrected.status.success());
    assert_eq!(String::from_utf8_lossy(&corrected.stdout), "5 41\n");
}

#[test]
fn extract_rejects_out_of_domain_entropy() {
    let out = Command::new(BIN)
        .args(["extract", "--bits", "8", "-n", "3", "-x", "256"])
        .output()
        .expect("run extract");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("does not fit in 8 bits"));
}

#[test]
fn shard_and_shuffle_are_deterministic() {
    let shard = |key: &str| {
        let out = Command::new(BIN)
            .args(["shard", "--key", key, "--shards", "10"])
            .output()
            .expect("run shard");
        assert!(out.status.success());
        String::from_utf8(out.stdout).unwrap()
    };
    let s = shard("user-42");
    assert_eq!(s, shard("user-42"));
    assert!(s.trim().parse::<u64>().unwrap() < 10);

    let shuffle = || {
        let out = Command::new(BIN)
            .args(["shuffle", "--seed", "s1", "a", "b", "c", "d", "e"])
            .output()
            .expect("run shuffle");
        assert!(out.status.success());
        String::from_utf8(out.stdout).unwrap()
    };
    let first = shuffle();
    assert_eq!(first, shuffle());
    let mut items: Vec<&str> = first.split_whitespace().collect();
    items.sort_unstable();
    assert_eq!(items, ["a", "b", "c", "d", "e"]);
}

#[test]
fn hash_ls_lists_known_hashes() {
    let out = Command::new(BIN).arg("hash-ls").output().expect("run hash-ls");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("blake3"));
    assert!(stdout.contains("keccak256"));
}
