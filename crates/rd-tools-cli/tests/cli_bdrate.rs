//! End-to-end checks for `rd-tools bdrate`.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn rd_tools() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("rd-tools"))
}

#[test]
fn bdrate_from_lists() {
    rd_tools()
        .args([
            "bdrate",
            "-b",
            "40433.88 7622.75 2394.49 1017.62",
            "-p",
            "37.58,35.38,33.90,32.06",
            "-b",
            "40370.12;7587.00;2390.00;1017.10",
            "-p37.60,35.40,33.92,32.08",
        ])
        .assert()
        .success()
        .stdout("BD-rate:-1.595326 BD-PSNR:0.023996\n");
}

#[test]
fn bdrate_from_pairs() {
    rd_tools()
        .args([
            "bdrate",
            "--ref",
            "40433.88,37.58",
            "--ref=7622.75,35.38",
            "--ref",
            "2394.49 33.90",
            "--ref",
            "1017.62 32.06",
            "--tst",
            "40370.12,37.60",
            "--tst=7587.00,35.40",
            "--tst",
            "2390.00 33.92",
            "--tst",
            "1017.10 32.08",
        ])
        .assert()
        .success()
        .stdout("BD-rate:-1.595326 BD-PSNR:0.023996\n");
}

#[test]
fn bdrate_json_output() {
    rd_tools()
        .args([
            "bdrate",
            "-b",
            "14265.54  5016.52  1692.18   834.53",
            "-p",
            " 40.52  38.21  36.52  34.82",
            "-b",
            "10779.78  3764.73  1350.1  665.00",
            "-p",
            "39.74 37.87 36.43 34.89",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bd_rate\": -11.2689"))
        .stdout(predicate::str::contains("\"bd_psnr\": 0.1985"));
}

#[test]
fn bdrate_from_csv() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let ref_csv = tmp.path().join("ref.csv");
    let tst_csv = tmp.path().join("tst.csv");
    fs::write(
        &ref_csv,
        concat!(
            "qp,bitrate,psnr\n",
            "22,40433.88,37.58\n",
            "27,7622.75,35.38\n",
            "32,2394.49,33.90\n",
            "37,1017.62,32.06\n",
        ),
    )?;
    fs::write(
        &tst_csv,
        concat!(
            "qp,bitrate,psnr\n",
            "22,40370.12,37.60\n",
            "27,7587.00,35.40\n",
            "32,2390.00,33.92\n",
            "37,1017.10,32.08\n",
        ),
    )?;

    rd_tools()
        .arg("bdrate")
        .arg("--ref-csv")
        .arg(&ref_csv)
        .arg("--tst-csv")
        .arg(&tst_csv)
        .assert()
        .success()
        .stdout("BD-rate:-1.595326 BD-PSNR:0.023996\n");
    Ok(())
}

#[test]
fn bdrate_lists_after_ref_pairs_are_test_curve() {
    rd_tools()
        .args(["bdrate", "--ref", "1000,30", "--ref", "2000,31"])
        .args(["--ref", "4000,32", "--ref", "8000,33"])
        .args(["-b", "900 1800 3600 7200", "-p", "30 31 32 33"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("BD-rate:-10.000000 "));
}

#[test]
fn bdrate_rejects_wrong_count() {
    rd_tools()
        .args(["bdrate", "-b", "1 2 3", "-p", "30 31 32 33"])
        .args(["-b", "1 2 3 4", "-p", "30 31 32 33"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 4 bitrate values (ref), but 3 values given"));
}

#[test]
fn bdrate_rejects_zero_bitrate() {
    rd_tools()
        .args(["bdrate", "-b", "0 2 3 4", "-p", "30 31 32 33"])
        .args(["-b", "1 2 3 4", "-p", "30 31 32 33"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bitrate must be positive"));
}

#[test]
fn bdrate_rejects_third_list() {
    rd_tools()
        .args(["bdrate", "-b", "1 2 3 4", "-b", "1 2 3 4", "-b", "1 2 3 4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too many bitrate values"));
}
