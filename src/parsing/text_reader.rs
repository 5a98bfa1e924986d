
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Opens a buffered line reader over a text file, transparently decompressing `.gz` inputs.
/// # Arguments
/// * `filename` - the file path to open
/// # Errors
/// * if the file does not open properly
pub fn open_text_reader(filename: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let reader: Box<dyn Read> = if filename.extension().unwrap_or_default() == "gz" {
        Box::new(flate2::read::MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(Box::new(BufReader::new(reader)))
}

/// Returns true if a file name ends with the given suffix, allowing an extra `.gz` extension.
/// # Arguments
/// * `file_name` - the candidate file name
/// * `suffix` - the required plain-text suffix
pub fn matches_suffix(file_name: &str, suffix: &str) -> bool {
    match file_name.strip_suffix(".gz") {
        Some(stripped) => stripped.ends_with(suffix),
        None => file_name.ends_with(suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use std::io::Write;

    #[test]
    fn test_plain_and_gzip_readers() {
        let temp_dir = tempfile::tempdir().unwrap();

        let plain_fn = temp_dir.path().join("counts.txt");
        std::fs::write(&plain_fn, "line1\nline2\n").unwrap();

        let gz_fn = temp_dir.path().join("counts.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&gz_fn).unwrap(), flate2::Compression::default());
        encoder.write_all(b"line1\nline2\n").unwrap();
        encoder.finish().unwrap();

        for filename in [plain_fn, gz_fn] {
            let reader = open_text_reader(&filename).unwrap();
            let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
            assert_eq!(lines, vec!["line1".to_string(), "line2".to_string()]);
        }
    }

    #[test]
    fn test_matches_suffix() {
        assert!(matches_suffix("NA12878_CodingExons.extended.csv", "CodingExons.extended.csv"));
        assert!(matches_suffix("NA12878_CodingExons.extended.csv.gz", "CodingExons.extended.csv"));
        assert!(!matches_suffix("NA12878_CodingExons.extended.csv", "WholeExomeRegions.extended.csv"));
        assert!(!matches_suffix("NA12878_CodingExons.extended.csv.gz.bak", "CodingExons.extended.csv"));
    }
}
