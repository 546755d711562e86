use blindspot::error::AppError;
use blindspot::report::Rubric;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn read_json_document<T, P>(path: P) -> Result<T, AppError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub(crate) fn load_rubric<P: AsRef<Path>>(path: P) -> Result<Rubric, AppError> {
    read_json_document(path)
}

/// Reads a survey payload file holding either a JSON array or a delimited string.
pub(crate) fn load_scores_file<P: AsRef<Path>>(path: P) -> Result<serde_json::Value, AppError> {
    read_json_document(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("blindspot-api-{}-{name}", std::process::id()));
        let mut file = File::create(&path).expect("scratch file created");
        file.write_all(contents.as_bytes()).expect("scratch file written");
        path
    }

    #[test]
    fn loads_rubric_document() {
        let path = scratch_file(
            "rubric.json",
            r#"{"name": "Leadership", "sections": [{"name": "Motive", "traits": []}]}"#,
        );
        let rubric = load_rubric(&path).expect("rubric loads");
        assert_eq!(rubric.name, "Leadership");
        assert_eq!(rubric.sections.len(), 1);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn malformed_rubric_is_a_document_error() {
        let path = scratch_file("broken.json", "{ not json");
        let error = load_rubric(&path).expect_err("document must parse");
        assert!(matches!(error, AppError::Document(_)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_scores_file_is_an_io_error() {
        let error = load_scores_file("./no-such-scores.json").expect_err("file is missing");
        assert!(matches!(error, AppError::Io(_)));
    }
}
