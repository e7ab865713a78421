#![allow(missing_docs)]

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::str;

const HELP_STR: &str = "Prints the cross-section limits of a signal model for each mass

Usage: limitplot read [OPTIONS] --signal <SIGNAL> [INPUT]

Arguments:
  [INPUT]  Path to the limit table [default: cards/higgsCombine_<SIGNAL>_best.csv]

Options:
  -s, --signal <SIGNAL>  Name of the signal model
      --digits <DIGITS>  Set the number of fractional digits shown for cross sections [default: 4]
  -e, --excluded         Show whether the observed limit excludes each mass
  -h, --help             Print help
";

const TABLE_STR: &str = "mh,limit,quantileExpected
800,0.5,-1
800,0.4,0.025
800,0.6,0.16
800,0.8,0.5
800,1.2,0.84
800,1.6,0.975
900,2.0,-1
900,0.8,0.5
1000,0.9,0.3
";

const DEFAULT_STR: &str = "mass   theory   observed   median      -2σ       -1σ       +1σ       +2σ   
[GeV]   [pb]      [pb]      [pb]      [pb]      [pb]      [pb]      [pb]   
-----+---------+---------+---------+---------+---------+---------+---------
  800 2.8334e-2 1.4167e-2 2.2667e-2 1.1334e-2 1.7000e-2 3.4001e-2 4.5334e-2
  900 1.2889e-2 2.5779e-2 1.0312e-2                                        
 1000 6.1513e-3                                                            
 1100 3.0741e-3                                                            
 1200 1.5984e-3                                                            
";

const EXCLUDED_STR: &str = "mass  theory  observed median    -2σ     -1σ     +1σ     +2σ   excluded
[GeV]  [pb]     [pb]    [pb]    [pb]    [pb]    [pb]    [pb]           
-----+-------+--------+-------+-------+-------+-------+-------+--------
  800 2.83e-2  1.42e-2 2.27e-2 1.13e-2 1.70e-2 3.40e-2 4.53e-2   yes   
  900 1.29e-2  2.58e-2 1.03e-2                                    no   
 1000 6.15e-3                                                          
 1100 3.07e-3                                                          
 1200 1.60e-3                                                          
";

#[test]
fn help() {
    Command::cargo_bin("limitplot")
        .unwrap()
        .args(["read", "--help"])
        .assert()
        .success()
        .stdout(HELP_STR);
}

#[test]
fn default() {
    let dir = TempDir::new().unwrap();
    let input = dir.child("limits.csv");
    input.write_str(TABLE_STR).unwrap();

    Command::cargo_bin("limitplot")
        .unwrap()
        .args(["read", "--signal=T2tt"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(DEFAULT_STR);
}

#[test]
fn excluded() {
    let dir = TempDir::new().unwrap();
    let input = dir.child("limits.csv");
    input.write_str(TABLE_STR).unwrap();

    Command::cargo_bin("limitplot")
        .unwrap()
        .args(["read", "--signal=T2tt", "--excluded", "--digits=2"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(EXCLUDED_STR);
}

#[test]
fn unknown_quantile_tags() {
    let dir = TempDir::new().unwrap();
    let input = dir.child("limits.csv");
    input.write_str(TABLE_STR).unwrap();

    Command::cargo_bin("limitplot")
        .unwrap()
        .env("RUST_LOG", "warn")
        .args(["read", "--signal=T2tt"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(DEFAULT_STR)
        .stderr(str::contains(
            "skipping 1 rows with unknown quantile tags",
        ));
}

#[test]
fn unknown_signal() {
    let dir = TempDir::new().unwrap();
    let input = dir.child("limits.csv");
    input.write_str(TABLE_STR).unwrap();

    Command::cargo_bin("limitplot")
        .unwrap()
        .args(["read", "--signal=foo"])
        .arg(input.path())
        .assert()
        .failure()
        .stderr(str::contains(
            "unknown signal model `foo`, expected one of: T1tttt, T2tt",
        ))
        .stdout("");
}

#[test]
fn unknown_mass() {
    let dir = TempDir::new().unwrap();
    let input = dir.child("limits.csv");
    input.write_str(TABLE_STR).unwrap();

    Command::cargo_bin("limitplot")
        .unwrap()
        .args(["read", "--signal=T1tttt"])
        .arg(input.path())
        .assert()
        .failure()
        .stderr(str::contains(
            "no cross section for mass 800 in signal model `T1tttt`",
        ))
        .stdout("");
}
