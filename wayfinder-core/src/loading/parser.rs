use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::config::EdgeRecord;
use crate::Error;

/// Reads a CSV edge list with a `from,to,distance` header
///
/// # Errors
///
/// Returns [`Error::CsvError`] on the first malformed row.
pub fn read_edges<R: Read>(reader: R) -> Result<Vec<EdgeRecord>, Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .map(|record| record.map_err(Error::from))
        .collect()
}

/// # Errors
///
/// Returns an error if the file cannot be opened or a row is malformed.
pub fn deserialize_edges_file(path: &Path) -> Result<Vec<EdgeRecord>, Error> {
    let file = File::open(path)?;
    read_edges(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_trimmed_rows() {
        let data = "from,to,distance\nMain Gate, Library ,250\nLibrary,Cafeteria,120.5\n";
        let edges = read_edges(data.as_bytes()).unwrap();

        assert_eq!(
            edges,
            [
                EdgeRecord::new("Main Gate", "Library", 250.0),
                EdgeRecord::new("Library", "Cafeteria", 120.5),
            ]
        );
    }

    #[test]
    fn malformed_distance_is_an_error() {
        let data = "from,to,distance\nA,B,far\n";

        assert!(matches!(read_edges(data.as_bytes()), Err(Error::CsvError(_))));
    }

    #[test]
    fn missing_file() {
        let result = deserialize_edges_file(Path::new("does/not/exist.csv"));

        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
