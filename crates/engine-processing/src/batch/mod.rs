pub mod functions;
pub mod processor;
pub mod row_processor;

pub use functions::{EntityBatchFn, HierarchyBatchFn, RelationBatchFn};
pub use processor::{BatchFn, BatchProcessor};
pub use row_processor::{BatchRowProcessor, RowProcessor};
