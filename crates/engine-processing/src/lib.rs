pub mod batch;
pub mod error;
pub mod export;
pub mod stream;
pub mod transform;
