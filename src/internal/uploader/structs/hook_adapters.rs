//! 单事件钩子适配器：将闭包包装成 [`UploadHook`]，供 `with_xx_hook` 使用。

use crate::internal::transport::structs::transport_reply::TransportReply;
use crate::internal::uploader::structs::response_document::ResponseDocument;
use crate::internal::uploader::traits::upload_hook::UploadHook;

/// 仅实现「开始上传」的钩子适配器。
pub(crate) struct OnUploadHookAdapter<F>(pub(crate) F);

impl<F> UploadHook for OnUploadHookAdapter<F>
where
    F: Fn(usize, &str) + Send + Sync,
{
    fn on_upload(&self, id: usize, name: &str) {
        (self.0)(id, name);
    }
}

/// 仅实现「进度」的钩子适配器。
pub(crate) struct OnProgressHookAdapter<F>(pub(crate) F);

impl<F> UploadHook for OnProgressHookAdapter<F>
where
    F: Fn(usize, &str, u64, u64) + Send + Sync,
{
    fn on_progress(&self, id: usize, name: &str, loaded: u64, total: u64) {
        (self.0)(id, name, loaded, total);
    }
}

/// 仅实现「完成」的钩子适配器。
pub(crate) struct OnCompleteHookAdapter<F>(pub(crate) F);

impl<F> UploadHook for OnCompleteHookAdapter<F>
where
    F: Fn(usize, &str, &ResponseDocument) + Send + Sync,
{
    fn on_complete(&self, id: usize, name: &str, response: &ResponseDocument) {
        (self.0)(id, name, response);
    }
}

/// 仅实现「取消」的钩子适配器。
pub(crate) struct OnCancelHookAdapter<F>(pub(crate) F);

impl<F> UploadHook for OnCancelHookAdapter<F>
where
    F: Fn(usize, &str) + Send + Sync,
{
    fn on_cancel(&self, id: usize, name: &str) {
        (self.0)(id, name);
    }
}

/// 仅实现「自动重试决策」的钩子适配器。
pub(crate) struct OnAutoRetryHookAdapter<F>(pub(crate) F);

impl<F> UploadHook for OnAutoRetryHookAdapter<F>
where
    F: Fn(usize, &str, &ResponseDocument, &TransportReply) -> bool + Send + Sync,
{
    fn on_auto_retry(
        &self,
        id: usize,
        name: &str,
        response: &ResponseDocument,
        reply: &TransportReply,
    ) -> bool {
        (self.0)(id, name, response, reply)
    }
}

/// 仅实现「出队」的钩子适配器。
pub(crate) struct OnDequeueHookAdapter<F>(pub(crate) F);

impl<F> UploadHook for OnDequeueHookAdapter<F>
where
    F: Fn(usize) + Send + Sync,
{
    fn on_dequeue(&self, id: usize) {
        (self.0)(id);
    }
}
