//! Blob 切片器：按优先级探测文件对象提供的切片能力，选中第一个可用的。
//!
//! 能力列表在 [`SLICE_CAPABILITIES`] 中按优先级排列：
//!
//! 1. [`SharedBytesSlice`]：内存数据，`Bytes::slice` 零拷贝
//! 2. [`LocalPathSlice`]：磁盘文件，记录路径与区间，发送时再读取
//!
//! 探测在 [`BlobSlicer::for_file`] 时一次完成；都不可用则立即返回
//! [`UploadError::NoSliceCapability`]，不会拖到发送阶段才失败。

use crate::internal::blob::structs::blob_slice::BlobSlice;
use crate::internal::blob::traits::file_like::FileLike;
use crate::internal::uploader::structs::upload_error::UploadError;

/// 一种切片能力。
pub trait SliceCapability: Send + Sync {
    /// 能力名，仅用于日志。
    fn name(&self) -> &'static str;

    /// 该文件是否提供本能力。
    fn supports(&self, file: &dyn FileLike) -> bool;

    /// 切出 `[start, end)`；文件不提供本能力时返回 `None`。
    fn slice(&self, file: &dyn FileLike, start: u64, end: u64) -> Option<BlobSlice>;
}

/// 内存数据切片能力。
pub struct SharedBytesSlice;

impl SliceCapability for SharedBytesSlice {
    fn name(&self) -> &'static str {
        "shared_bytes"
    }

    fn supports(&self, file: &dyn FileLike) -> bool {
        file.shared_bytes().is_some()
    }

    fn slice(&self, file: &dyn FileLike, start: u64, end: u64) -> Option<BlobSlice> {
        let bytes = file.shared_bytes()?;
        let len = bytes.len();
        let start = (start as usize).min(len);
        let end = (end as usize).clamp(start, len);
        Some(BlobSlice::Shared(bytes.slice(start..end)))
    }
}

/// 本地文件区间切片能力。
pub struct LocalPathSlice;

impl SliceCapability for LocalPathSlice {
    fn name(&self) -> &'static str {
        "local_path"
    }

    fn supports(&self, file: &dyn FileLike) -> bool {
        file.local_path().is_some()
    }

    fn slice(&self, file: &dyn FileLike, start: u64, end: u64) -> Option<BlobSlice> {
        let path = file.local_path()?;
        let end = end.min(file.size()).max(start);
        Some(BlobSlice::FileRange {
            path: path.to_path_buf(),
            start,
            len: end - start,
        })
    }
}

/// 按优先级排列的切片能力。
pub static SLICE_CAPABILITIES: &[&dyn SliceCapability] = &[&SharedBytesSlice, &LocalPathSlice];

/// 已为某个文件选定能力的切片器。
pub struct BlobSlicer {
    capability: &'static dyn SliceCapability,
}

impl std::fmt::Debug for BlobSlicer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobSlicer")
            .field("capability", &self.capability.name())
            .finish()
    }
}

impl BlobSlicer {
    /// 使用默认能力列表为文件选定切片能力。
    pub fn for_file(file: &dyn FileLike) -> Result<Self, UploadError> {
        Self::select(file, SLICE_CAPABILITIES)
    }

    /// 在给定候选中按顺序选第一个文件支持的能力。
    pub fn select(
        file: &dyn FileLike,
        candidates: &[&'static dyn SliceCapability],
    ) -> Result<Self, UploadError> {
        candidates
            .iter()
            .copied()
            .find(|c| c.supports(file))
            .map(|capability| {
                tracing::debug!(file = file.name(), capability = capability.name(), "选定切片能力");
                Self { capability }
            })
            .ok_or_else(|| UploadError::NoSliceCapability(file.name().to_string()))
    }

    /// 选中能力的名称。
    pub fn capability_name(&self) -> &'static str {
        self.capability.name()
    }

    /// 切出 `[start, end)` 的惰性视图。
    pub fn slice(&self, file: &dyn FileLike, start: u64, end: u64) -> Result<BlobSlice, UploadError> {
        self.capability
            .slice(file, start, end)
            .ok_or_else(|| UploadError::NoSliceCapability(file.name().to_string()))
    }
}
