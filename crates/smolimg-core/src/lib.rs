pub mod batch;
pub mod transform;

pub use batch::{process_batch, BatchItem, FileOutcome};
pub use transform::{savings_pct, transform, TransformRequest, TransformResult};
