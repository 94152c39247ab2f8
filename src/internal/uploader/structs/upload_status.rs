/// 单个文件的上传状态（由状态机内部维护，外部只读）。
///
/// 非分片：`Idle → Starting → Uploading → Completed | Failed | Cancelled`；
/// 分片：`Idle → Starting → ChunkInFlight { part: i } → ChunkInFlight { part: i + 1 } … → Completed | Failed | Cancelled`。
/// 任一发送状态下服务端返回失败且重试钩子接管时进入 `RetryRequested`，重发后回到发送状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    /// `upload` 已认领该 id，正在规划并准备发出第一个请求
    Starting,
    Uploading,
    ChunkInFlight { part: usize },
    RetryRequested,
    Completed,
    Failed,
    Cancelled,
}

impl UploadStatus {
    /// 上传正在进行（含等待钩子重发），此时再次 `upload` 会被忽略。
    pub fn is_busy(&self) -> bool {
        self.is_sending() || matches!(self, UploadStatus::Starting | UploadStatus::RetryRequested)
    }

    /// 有请求正在路上。
    pub fn is_sending(&self) -> bool {
        matches!(self, UploadStatus::Uploading | UploadStatus::ChunkInFlight { .. })
    }
}
