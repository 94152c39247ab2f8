pub mod blob_slice;
pub mod local_file;
pub mod memory_file;

// 重导出公共类型
pub use blob_slice::{BlobSlice, BlobStream};
pub use local_file::LocalFile;
pub use memory_file::MemoryFile;
