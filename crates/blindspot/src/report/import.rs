use super::normalizer::RawScores;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum SurveyImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for SurveyImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyImportError::Io(err) => write!(f, "failed to read survey results: {}", err),
            SurveyImportError::Csv(err) => write!(f, "invalid survey results CSV: {}", err),
        }
    }
}

impl std::error::Error for SurveyImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurveyImportError::Io(err) => Some(err),
            SurveyImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SurveyImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SurveyImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One respondent's raw scale results as exported by the survey store.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyResult {
    pub respondent_id: String,
    pub scores: RawScores,
}

#[derive(Debug, Deserialize)]
struct SurveyResultRow {
    respondent_id: String,
    #[serde(default)]
    e3_scales21: String,
}

/// Reads a `respondent_id,e3_scales21` export; the second column holds the
/// comma-joined scores and is usually quoted.
pub fn read_survey_results<R: Read>(reader: R) -> Result<Vec<SurveyResult>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut results = Vec::new();

    for record in csv_reader.deserialize::<SurveyResultRow>() {
        let row = record?;
        results.push(SurveyResult {
            respondent_id: row.respondent_id,
            scores: RawScores::Delimited(row.e3_scales21),
        });
    }

    Ok(results)
}

pub fn read_survey_results_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<SurveyResult>, SurveyImportError> {
    let file = std::fs::File::open(path)?;
    Ok(read_survey_results(file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_quoted_score_column() {
        let csv = "respondent_id,e3_scales21\nr-001,\"25, 50,75\"\nr-002,\"10,20\"\n";
        let results = read_survey_results(Cursor::new(csv)).expect("csv parses");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].respondent_id, "r-001");
        assert_eq!(results[0].scores, RawScores::Delimited("25, 50,75".to_string()));
        assert_eq!(results[1].scores, RawScores::Delimited("10,20".to_string()));
    }

    #[test]
    fn missing_score_column_reads_as_empty_payload() {
        let csv = "respondent_id\nr-001\n";
        let results = read_survey_results(Cursor::new(csv)).expect("csv parses");
        assert_eq!(results[0].scores, RawScores::Delimited(String::new()));
    }

    #[test]
    fn ragged_rows_are_csv_errors() {
        let csv = "respondent_id,e3_scales21\nr-001,25,50,75\n";
        assert!(read_survey_results(Cursor::new(csv)).is_err());
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = read_survey_results_from_path("./does-not-exist.csv").expect_err("io error");
        match error {
            SurveyImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
