use crate::internal::blob::structs::blob_slice::BlobSlice;

/// 分片的字节区间 `[start, end)`，由分片规划器计算。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// 分片序号，从 0 开始
    pub part: usize,
    /// 起始偏移（含）
    pub start: u64,
    /// 结束偏移（不含）
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// 分片描述：区间加上对应的数据视图，创建后不再修改。
#[derive(Debug, Clone)]
pub struct ChunkDescriptor {
    pub part: usize,
    pub start: u64,
    pub end: u64,
    pub blob: BlobSlice,
}

impl ChunkDescriptor {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}
