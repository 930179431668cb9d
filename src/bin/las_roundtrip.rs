//! Read a LAS file, print a summary, and optionally write it back out.
//!
//! Usage: las_roundtrip <input.las> [output.las] [2.0|3.0]

use anyhow::{bail, Context, Result};
use lasrust::io::LasReader;
use lasrust::{LasVersion, LasWriter};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(input) = args.first() else {
        bail!("usage: las_roundtrip <input.las> [output.las] [2.0|3.0]");
    };

    let doc = LasReader::from_file(input)
        .and_then(|reader| reader.read())
        .with_context(|| format!("failed to read {}", input))?;

    println!("{}", input);
    println!(
        "  version: {}",
        doc.las_version().map_or("unknown", |v| v.as_str())
    );
    println!("  wrap:    {}", doc.wrap_mode().as_str());
    println!("  null:    {}", doc.null_value());
    println!("  rows:    {}", doc.row_count());
    if let Some((start, stop)) = doc.depth_range() {
        println!("  range:   {} .. {}", start, stop);
    }
    for curve in doc.curves().iter() {
        println!(
            "  curve {:>3}: {}.{}  {}",
            curve.index, curve.mnemonic, curve.unit, curve.description
        );
    }
    for notification in doc.notifications() {
        println!("  {}", notification);
    }

    let Some(output) = args.get(1) else {
        return Ok(());
    };
    let version = match args.get(2) {
        None => LasVersion::V2_0,
        Some(text) => match LasVersion::from_version_string(text) {
            Some(version) if version.is_writable() => version,
            _ => bail!("cannot write LAS version {}", text),
        },
    };

    LasWriter::new(&doc)
        .with_version(version)
        .write_to_file(output)
        .with_context(|| format!("failed to write {}", output))?;

    let reread = LasReader::from_file(output)
        .and_then(|reader| reader.read())
        .with_context(|| format!("failed to read back {}", output))?;
    if reread.curve_names() != doc.curve_names() || reread.row_count() != doc.row_count() {
        bail!("{} does not match {} after writing", output, input);
    }

    let mut max_deviation = 0.0f64;
    for name in doc.curve_names() {
        let before = doc.curve_data(name)?;
        let after = reread.curve_data(name)?;
        for (a, b) in before.iter().zip(after) {
            max_deviation = max_deviation.max((a - b).abs());
        }
    }
    println!(
        "wrote {} (LAS {}), max deviation {:e}",
        output,
        version.as_str(),
        max_deviation
    );
    Ok(())
}
