//! 分片规划：按文件大小与分片大小计算各分片区间，并生成分片队列。

use std::collections::VecDeque;

use crate::internal::blob::slicer::BlobSlicer;
use crate::internal::blob::traits::file_like::FileLike;
use crate::internal::uploader::structs::chunk_descriptor::{ByteRange, ChunkDescriptor};
use crate::internal::uploader::structs::upload_error::UploadError;

/// 计算分片区间：`[0, C), [C, 2C), …`，最后一片截断到 `size`。
///
/// 各区间连续、不重叠，恰好覆盖 `[0, size)`；`size == 0` 时返回空列表。
/// `chunk_size` 为 0 时同样返回空列表（构建处理器时已拒绝该配置）。
pub fn plan_byte_ranges(size: u64, chunk_size: u64) -> Vec<ByteRange> {
    if chunk_size == 0 {
        return Vec::new();
    }

    let mut ranges = Vec::with_capacity(size.div_ceil(chunk_size) as usize);
    let mut start: u64 = 0;
    while start < size {
        let end = start.saturating_add(chunk_size).min(size);
        ranges.push(ByteRange {
            part: ranges.len(),
            start,
            end,
        });
        start = end;
    }
    ranges
}

/// 为文件生成完整的分片队列。切片能力只探测一次，找不到能力时立即失败。
pub(crate) fn build_chunk_queue(
    file: &dyn FileLike,
    size: u64,
    chunk_size: u64,
) -> Result<VecDeque<ChunkDescriptor>, UploadError> {
    let slicer = BlobSlicer::for_file(file)?;

    plan_byte_ranges(size, chunk_size)
        .into_iter()
        .map(|range| {
            Ok(ChunkDescriptor {
                part: range.part,
                start: range.start,
                end: range.end,
                blob: slicer.slice(file, range.start, range.end)?,
            })
        })
        .collect()
}
