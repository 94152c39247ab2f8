use std::sync::Arc;

use crate::internal::blob::traits::file_like::FileLike;

/// 已注册文件的记录。名称与大小在注册时取出，之后不再向文件对象查询。
#[derive(Debug, Clone)]
pub(crate) struct FileRecord {
    pub(crate) file: Arc<dyn FileLike>,
    pub(crate) name: String,
    pub(crate) size: u64,
}

impl FileRecord {
    pub(crate) fn new(file: Arc<dyn FileLike>) -> Self {
        let name = file.name().to_string();
        let size = file.size();
        Self { file, name, size }
    }
}
