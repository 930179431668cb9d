//! Shared test utilities for lasrust integration tests.
//!
//! Sample documents, float comparison and write-then-read helpers that all
//! test crates import via `mod common;`.

#![allow(dead_code)]

use lasrust::{parse_las, LasDocument, LasVersion, LasWriter, Section, SectionEntry};

// ===========================================================================
// Sample documents
// ===========================================================================

/// Three depth steps with DEPT, GR and RHOB
pub const SIMPLE_LAS: &str = "\
~VERSION INFORMATION
 VERS.   2.0 : CWLS LOG ASCII STANDARD -VERSION 2.0
 WRAP.   NO  : ONE LINE PER DEPTH STEP
~WELL INFORMATION
 STRT.M  100.0 : START DEPTH
 STOP.M  101.0 : STOP DEPTH
 STEP.M  0.5   : STEP
 NULL.   -999.25 : NULL VALUE
~CURVE INFORMATION
 DEPT.M    : DEPTH
 GR.GAPI   : GAMMA RAY
 RHOB.G/C3 : BULK DENSITY
~A  DEPT  GR  RHOB
100.0 45.2 2.35
100.5 48.1 2.38
101.0 42.0 2.34
";

/// Descending depth, comments, a parameter and an other section
pub const SAMPLE_LAS: &str = "\
# LAS exported from a logging unit
~VERSION INFORMATION
 VERS.                  2.0 :   CWLS LOG ASCII STANDARD -VERSION 2.0
 WRAP.                  NO  :   ONE LINE PER DEPTH STEP
~WELL INFORMATION BLOCK
#MNEM.UNIT       DATA TYPE    INFORMATION
#---------    -------------   ------------------------------
 STRT.M        1670.0000 :
 STOP.M        1669.7500 :
 STEP.M        -0.1250   :
 NULL.         -999.25   :
 COMP.         ANY OIL COMPANY INC. : COMPANY
 WELL.         AAAAA_2   : WELL
 DATE.         13-DEC-86 : LOG DATE
~CURVE INFORMATION
 DEPT.M                    :  1  DEPTH
 DT  .US/M                 :  2  SONIC TRANSIT TIME
~PARAMETER INFORMATION
 BHT .DEGC      35.5000 : BOTTOM HOLE TEMPERATURE
 MDWT.          1.2 : MUD WEIGHT
~Other
     Note: The logging tools became stuck at 625 meters causing the data
     between 625 meters and 615 meters to be invalid.
~A  DEPTH     DT
1670.000   123.450
1669.875   -999.25
1669.750   124.500
";

/// Three curves, each row spread over two physical lines
pub const WRAPPED_LAS: &str = "\
~VERSION INFORMATION
 VERS.   2.0 : CWLS LOG ASCII STANDARD -VERSION 2.0
 WRAP.   YES : MULTIPLE LINES PER DEPTH STEP
~WELL INFORMATION
 NULL.   -999.25 : NULL VALUE
~CURVE INFORMATION
 DEPT.M    : DEPTH
 GR.GAPI   : GAMMA RAY
 RHOB.G/C3 : BULK DENSITY
~A
100.0
45.2 2.35
100.5
48.1 2.38
";

// ===========================================================================
// Comparison helpers
// ===========================================================================

/// Tolerance for values that went through text formatting
pub const TOLERANCE: f64 = 1e-6;

/// Assert two sample slices are equal within [`TOLERANCE`]
pub fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch: {:?} vs {:?}", actual, expected);
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() <= TOLERANCE, "sample {}: {} != {}", i, a, e);
    }
}

/// Assert two header sections hold the same items in the same order
pub fn assert_same_section<T: SectionEntry>(actual: &Section<T>, expected: &Section<T>) {
    let actual: Vec<_> = actual.items().collect();
    let expected: Vec<_> = expected.items().collect();
    assert_eq!(actual, expected);
}

/// Assert two documents are equal: sections exactly, samples within tolerance
pub fn assert_same_document(actual: &LasDocument, expected: &LasDocument) {
    assert_same_section(actual.version(), expected.version());
    assert_same_section(actual.well(), expected.well());
    assert_same_section(actual.curves(), expected.curves());
    assert_same_section(actual.params(), expected.params());
    assert_eq!(actual.other(), expected.other());
    assert_eq!(actual.row_count(), expected.row_count());
    for name in expected.curve_names() {
        assert_close(actual.curve_data(name).unwrap(), expected.curve_data(name).unwrap());
    }
}

// ===========================================================================
// Roundtrip helpers
// ===========================================================================

/// Write `document` as `version` and return the text
pub fn write_text(document: &LasDocument, version: LasVersion) -> String {
    let bytes = LasWriter::new(document).with_version(version).write_to_vec().unwrap();
    String::from_utf8(bytes).unwrap()
}

/// Write `document` as `version` and parse the output again
pub fn roundtrip(document: &LasDocument, version: LasVersion) -> LasDocument {
    let text = write_text(document, version);
    parse_las(text.as_bytes()).unwrap_or_else(|e| panic!("re-read failed: {}\n{}", e, text))
}
