//! Liest Alerts als JSONL (Datei oder stdin) und gibt pro Zeile den
//! neu berechneten Fingerprint aus.
//!
//! Run with: cargo run -p evalert-core --example fingerprint_alerts -- alerts.jsonl

use evalert_core::{fingerprint, EvAlert};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args().nth(1);
    let reader: Box<dyn BufRead> = match path {
        Some(p) => Box::new(BufReader::new(File::open(p)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let alert = EvAlert::from_slice(line.as_bytes())?;
        let fp = fingerprint(alert.resource(), alert.kind());
        let marker = if alert.fingerprint_is_consistent() { "=" } else { "!" };
        println!("{marker}\t{}\t{fp}", alert.id);
    }

    Ok(())
}
