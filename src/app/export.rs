use std::path::Path;

use serde::Serialize;

use crate::error::{AppError, AppResult, OutputError};
use crate::metrics::{Sample, Summary};

#[derive(Serialize)]
struct ResultsDocument<'run> {
    summary: &'run Summary,
    results: &'run [Sample],
}

/// Write the summary and every sample as pretty-printed JSON.
pub(crate) async fn export_json(path: &Path, summary: &Summary, samples: &[Sample]) -> AppResult<()> {
    let document = ResultsDocument {
        summary,
        results: samples,
    };
    let mut body = serde_json::to_vec_pretty(&document)
        .map_err(|err| AppError::output(OutputError::Serialize { source: err }))?;
    body.push(b'\n');

    tokio::fs::write(path, body).await.map_err(|err| {
        AppError::output(OutputError::Write {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
