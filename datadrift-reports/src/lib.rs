//! Report assembly and publishing to the external document store.

pub mod assembler;
pub mod publisher;

pub use assembler::assemble_report;
pub use publisher::{DocStoreClient, PublishError, ReportPublisher};
