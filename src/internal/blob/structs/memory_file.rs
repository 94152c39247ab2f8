use bytes::Bytes;

use crate::internal::blob::traits::file_like::FileLike;

/// 内存中的文件：数据以 [`Bytes`] 持有，切片不复制。
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    mime: Option<String>,
    data: Bytes,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime: None,
            data: data.into(),
        }
    }

    /// 设置 MIME 类型。
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

impl FileLike for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    fn shared_bytes(&self) -> Option<&Bytes> {
        Some(&self.data)
    }
}
