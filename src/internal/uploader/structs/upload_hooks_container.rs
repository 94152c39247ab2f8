use crate::internal::transport::structs::transport_reply::TransportReply;
use crate::internal::uploader::structs::response_document::ResponseDocument;
use crate::internal::uploader::traits::upload_hook::UploadHook;

/// 钩子容器：构建时注册，之后只读，按注册顺序依次执行。
#[derive(Default)]
pub struct UploadHooksContainer {
    hooks: Vec<Box<dyn UploadHook>>,
}

impl UploadHooksContainer {
    /// 添加一个上传钩子；支持多次调用以注册多个钩子。
    pub fn add(&mut self, hook: impl UploadHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn run_on_upload(&self, id: usize, name: &str) {
        for h in &self.hooks {
            h.on_upload(id, name);
        }
    }

    pub fn run_on_progress(&self, id: usize, name: &str, loaded: u64, total: u64) {
        for h in &self.hooks {
            h.on_progress(id, name, loaded, total);
        }
    }

    pub fn run_on_complete(&self, id: usize, name: &str, response: &ResponseDocument) {
        for h in &self.hooks {
            h.on_complete(id, name, response);
        }
    }

    pub fn run_on_cancel(&self, id: usize, name: &str) {
        for h in &self.hooks {
            h.on_cancel(id, name);
        }
    }

    /// 依次询问各钩子，第一个返回 `true` 的接管重试，后面的不再询问。
    pub fn run_on_auto_retry(
        &self,
        id: usize,
        name: &str,
        response: &ResponseDocument,
        reply: &TransportReply,
    ) -> bool {
        self.hooks
            .iter()
            .any(|h| h.on_auto_retry(id, name, response, reply))
    }

    pub fn run_on_dequeue(&self, id: usize) {
        for h in &self.hooks {
            h.on_dequeue(id);
        }
    }
}

impl std::fmt::Debug for UploadHooksContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadHooksContainer")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
