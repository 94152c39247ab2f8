//! 文件类对象 trait：上传引擎只通过本接口读取名称、大小与切片能力。

use std::fmt::Debug;
use std::path::Path;

use bytes::Bytes;

/// 可被上传的文件类对象。
///
/// 切片能力以「可选能力」的形式暴露：实现方按自身情况返回 `Some`，
/// 由 [`BlobSlicer`](crate::blob::BlobSlicer) 按优先级挑选第一个可用的能力。
/// 两个能力都不提供时，该文件无法分片，也无法发送。
pub trait FileLike: Debug + Send + Sync {
    /// 文件名（用于 `X-File-Name` 头、表单文件名和查询参数）。
    fn name(&self) -> &str;

    /// 文件总字节数。
    fn size(&self) -> u64;

    /// MIME 类型；未知时为 `None`。
    fn mime_type(&self) -> Option<&str> {
        None
    }

    /// 能力一：整份数据已在内存中，可零拷贝切片。
    fn shared_bytes(&self) -> Option<&Bytes> {
        None
    }

    /// 能力二：数据在本地磁盘上，按区间惰性读取。
    fn local_path(&self) -> Option<&Path> {
        None
    }
}
