use std::sync::Arc;

/// 发送进度回报器：传输层每送出一段数据，调用 [`report`](Self::report) 告知本次请求已发送的字节数。
///
/// 数值是「当前请求」内的累计值，与整个文件无关；换算成整个文件的进度由上传状态机负责。
#[derive(Clone)]
pub struct ProgressReporter {
    sink: Arc<dyn Fn(u64) + Send + Sync>,
}

impl ProgressReporter {
    pub fn new(sink: impl Fn(u64) + Send + Sync + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// 不关心进度时使用。
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn report(&self, bytes_sent: u64) {
        (self.sink)(bytes_sent)
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ProgressReporter")
    }
}
