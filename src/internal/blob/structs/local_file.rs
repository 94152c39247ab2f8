use std::path::{Path, PathBuf};

use crate::internal::blob::traits::file_like::FileLike;
use crate::internal::uploader::structs::upload_error::UploadError;

/// 本地磁盘上的文件。创建时只读取元数据，内容在发送各分片时按区间读取。
#[derive(Debug, Clone)]
pub struct LocalFile {
    name: String,
    mime: Option<String>,
    path: PathBuf,
    size: u64,
}

impl LocalFile {
    /// 打开本地文件：读取大小，文件名取路径最后一段。
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(UploadError::ReadBlob)?;
        if metadata.is_dir() {
            return Err(UploadError::IsDir(path.display().to_string()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            mime: None,
            path,
            size: metadata.len(),
        })
    }

    /// 设置 MIME 类型。
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// 覆盖上传时使用的文件名。
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl FileLike for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    fn local_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
