pub mod chunk_descriptor;
pub mod chunk_param_names;
pub mod file_record;
pub mod hook_adapters;
pub mod response_document;
pub mod upload_error;
pub mod upload_handler;
pub mod upload_hooks_container;
pub mod upload_options;
pub mod upload_status;

// 重导出公共类型
pub use chunk_descriptor::{ByteRange, ChunkDescriptor};
pub use chunk_param_names::ChunkParamNames;
pub use response_document::{ResponseDocument, ResponseOutcome};
pub use upload_error::UploadError;
pub use upload_handler::{FileId, UploadHandler, UploadHandlerBuilder};
pub use upload_options::UploadOptions;
pub use upload_status::UploadStatus;
