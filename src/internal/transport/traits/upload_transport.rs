//! 传输接口：状态机只依赖本 trait，具体用哪个 HTTP 库由调用方决定。

use async_trait::async_trait;

use crate::internal::transport::structs::{ProgressReporter, TransportReply, UploadRequest};
use crate::internal::uploader::structs::upload_error::UploadError;

/// 发送一次上传请求并返回原始响应。
///
/// - 发送过程中通过 `progress` 回报本次请求已送出的字节数；
/// - 服务端返回任何状态码都算成功返回 `Ok`，由状态机判断成败；
/// - 只有传输本身失败时才返回 `Err`，状态机会把它当作状态码 0 处理。
///
/// 每次调用都在独立的 tokio 任务中执行；取消上传时该任务会被中止，
/// 实现方无需自行处理取消。超时同样属于传输层的配置。
#[async_trait]
pub trait UploadTransport: Send + Sync + 'static {
    async fn send(
        &self,
        request: UploadRequest,
        progress: ProgressReporter,
    ) -> Result<TransportReply, UploadError>;
}
