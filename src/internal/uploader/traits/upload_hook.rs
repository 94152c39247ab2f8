//! 上传钩子接口：状态机通过它把事件告知外部调度方。
//!
//! 上传器由调度方创建并驱动；对外使用入口为 [`crate::uploader`]。

use crate::internal::transport::structs::transport_reply::TransportReply;
use crate::internal::uploader::structs::response_document::ResponseDocument;

/// 上传流程钩子：所有回调都以文件 id 与文件名为键。
///
/// 使用方式二选一（可混用）：
/// - **单事件**：用 `with_on_progress_hook` / `with_on_complete_hook` 等传入闭包；
/// - **完整钩子**：实现本 trait，通过构建器的 `with_hook` 注册。
///
/// 回调时状态机不持有内部锁，钩子内可以再调用上传器的方法（如在进度回调里 `cancel`）。
pub trait UploadHook: Send + Sync {
    /// 文件开始上传（紧随其后会有一次 `loaded = 0` 的进度事件）。
    fn on_upload(&self, _id: usize, _name: &str) {}

    /// 进度更新；`loaded` 与 `total` 都是整个文件的字节数，不是单个分片的。
    fn on_progress(&self, _id: usize, _name: &str, _loaded: u64, _total: u64) {}

    /// 上传结束。成功时之前必有一次 `loaded == total` 的进度事件；
    /// 失败且未重试时 `response` 为失败的响应文档。
    fn on_complete(&self, _id: usize, _name: &str, _response: &ResponseDocument) {}

    /// 上传被取消。之后该 id 不会再有任何事件。
    fn on_cancel(&self, _id: usize, _name: &str) {}

    /// 服务端返回失败时调用，由钩子决定是否重试。
    ///
    /// 返回 `true` 表示钩子接管：状态机不再做任何处理，钩子负责稍后调用
    /// [`UploadHandler::retry`](crate::uploader::UploadHandler::retry)。
    /// 重试总是重发当前分片（队首），已确认的分片不会重发。
    fn on_auto_retry(
        &self,
        _id: usize,
        _name: &str,
        _response: &ResponseDocument,
        _reply: &TransportReply,
    ) -> bool {
        false
    }

    /// 该 id 已离开处理流程，调度方可以开始下一个文件。
    fn on_dequeue(&self, _id: usize) {}
}
