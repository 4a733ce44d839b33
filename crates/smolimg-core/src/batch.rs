use crate::transform::{transform, TransformRequest, TransformResult};
use smolimg_common::Result;

/// One uploaded file waiting for transformation
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Per-file outcome; failures are captured, never propagated
#[derive(Debug)]
pub struct FileOutcome {
    pub name: String,
    pub result: Result<TransformResult>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run the transform over a batch, one file at a time, in upload order.
///
/// A failure on file N is recorded in its outcome and must never abort
/// file N+1. The returned vector always has one entry per input.
pub fn process_batch(items: Vec<BatchItem>, request: &TransformRequest) -> Vec<FileOutcome> {
    let total = items.len();
    tracing::info!("Starting batch: {} files", total);

    let outcomes: Vec<FileOutcome> = items
        .into_iter()
        .map(|item| {
            let result = transform(&item.bytes, request);

            if let Err(ref e) = result {
                tracing::warn!("Skipping {}: {}", item.name, e);
            }

            FileOutcome {
                name: item.name,
                result,
            }
        })
        .collect();

    tracing::info!(
        "Batch complete: {}/{} succeeded",
        outcomes.iter().filter(|o| o.is_ok()).count(),
        total
    );

    outcomes
}
