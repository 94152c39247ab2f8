//! 分片上传处理器
//!
//! 本模块实现单个文件的分片/整文件上传状态机，是整个库的核心。
//!
//! ## 功能特性
//!
//! - **整文件上传**：未启用分片（或文件为空）时，一次请求发送整个文件
//! - **分片上传**：按 `chunk_size` 切成连续区间，逐片串行发送，每片附带序号、偏移、长度、总大小、是否最后一片
//! - **整体进度**：进度永远以整个文件为基准，已确认分片 + 当前请求在途字节
//! - **重试控制反转**：服务端返回失败时交给外部钩子决定是否重试，本模块不计数、不退避
//! - **取消**：任何非终止状态都可取消，在途请求立即中止，迟到的回调安全忽略
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use chunked_uploader::uploader::{UploadHandler, UploadOptions};
//! # use chunked_uploader::blob::MemoryFile;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = UploadHandler::builder(UploadOptions::new("https://example.com/upload").chunked(400))
//!     .with_on_progress_hook(|id, name, loaded, total| {
//!         println!("{id} {name}: {loaded}/{total}");
//!     })
//!     .with_on_complete_hook(|id, _name, response| {
//!         println!("{id} 完成: success={}", response.is_success());
//!     })
//!     .build()?;
//!
//! let id = handler.add(MemoryFile::new("a.bin", vec![0u8; 1000]));
//! handler.upload(id)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## 内部实现说明
//!
//! - `byte_range_planner`：分片区间计算与分片队列生成
//! - `progress_aggregator`：整体进度换算，保证单调且 100% 只报告一次
//! - `transport_registry`：每个 id 一个在途请求句柄，用于中止与识别过期回调
//! - `request_builder`：按配置组装请求
//! - `response_interpreter`：宽松解析响应体并判定成败
//! - `state_machine`：开始、发送、完成、重试、取消

mod byte_range_planner;
mod progress_aggregator;
mod request_builder;
mod response_interpreter;
mod state_machine;
mod transport_registry;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use url::Url;

use crate::internal::blob::structs::blob_slice::BlobSlice;
use crate::internal::blob::traits::file_like::FileLike;
use crate::internal::transport::structs::reqwest_transport::ReqwestTransport;
use crate::internal::transport::structs::transport_reply::TransportReply;
use crate::internal::transport::traits::upload_transport::UploadTransport;
use crate::internal::uploader::traits::params_source::{Params, ParamsSource};
use crate::internal::uploader::traits::upload_hook::UploadHook;

use super::chunk_descriptor::ChunkDescriptor;
use super::file_record::FileRecord;
use super::hook_adapters::{
    OnAutoRetryHookAdapter, OnCancelHookAdapter, OnCompleteHookAdapter, OnDequeueHookAdapter,
    OnProgressHookAdapter, OnUploadHookAdapter,
};
use super::response_document::ResponseDocument;
use super::upload_error::UploadError;
use super::upload_hooks_container::UploadHooksContainer;
use super::upload_options::UploadOptions;
use super::upload_status::UploadStatus;

use progress_aggregator::ProgressAggregator;
use transport_registry::TransportRegistry;

pub use byte_range_planner::plan_byte_ranges;
pub use request_builder::{ChunkMeta, encode_uri_component};
pub use response_interpreter::{SUCCESS_STATUS, classify, parse_response_document};

/// 文件 id：注册时单调分配，永不复用。
pub type FileId = usize;

/// 单个文件的发送计划。
#[derive(Debug)]
pub(crate) enum TransferPlan {
    /// 整文件一次发送
    Single(BlobSlice),
    /// 待确认的分片队列，队首为在途或下一个要发送的分片
    Chunked(VecDeque<ChunkDescriptor>),
}

/// 按 id 划分的可变状态。只在持锁期间读写，钩子调用前一定先释放锁。
#[derive(Debug, Default)]
pub(crate) struct HandlerState {
    /// 文件记录；取消或完成后置为 `None`，下标保持不变
    pub(crate) files: Vec<Option<FileRecord>>,
    pub(crate) status: HashMap<FileId, UploadStatus>,
    pub(crate) plans: HashMap<FileId, TransferPlan>,
    pub(crate) transports: TransportRegistry,
    pub(crate) progress: ProgressAggregator,
}

impl HandlerState {
    pub(crate) fn record(&self, id: FileId) -> Option<&FileRecord> {
        self.files.get(id).and_then(Option::as_ref)
    }

    pub(crate) fn status_of(&self, id: FileId) -> Option<UploadStatus> {
        self.status.get(&id).copied()
    }
}

pub(crate) struct HandlerInner {
    pub(crate) options: UploadOptions,
    pub(crate) endpoint: Url,
    pub(crate) transport: Arc<dyn UploadTransport>,
    pub(crate) params: Arc<dyn ParamsSource>,
    pub(crate) hooks: UploadHooksContainer,
    pub(crate) state: Mutex<HandlerState>,
}

/// 分片上传处理器。克隆得到的是同一个处理器的共享句柄。
///
/// 发送请求需要在 tokio 运行时内调用（每次请求 spawn 一个任务）。
#[derive(Clone)]
pub struct UploadHandler {
    pub(crate) inner: Arc<HandlerInner>,
}

impl std::fmt::Debug for UploadHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadHandler")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("hooks", &self.inner.hooks)
            .finish()
    }
}

/// 处理器构建器：配置传输、参数来源与钩子，`build` 后不可再改。
pub struct UploadHandlerBuilder {
    options: UploadOptions,
    transport: Option<Arc<dyn UploadTransport>>,
    params: Arc<dyn ParamsSource>,
    hooks: UploadHooksContainer,
}

impl UploadHandler {
    pub fn builder(options: UploadOptions) -> UploadHandlerBuilder {
        UploadHandlerBuilder {
            options,
            transport: None,
            params: Arc::new(Params::new()),
            hooks: UploadHooksContainer::default(),
        }
    }
}

impl UploadHandlerBuilder {
    /// 设置传输实现；不调用则使用默认的 [`ReqwestTransport`]。
    pub fn transport(mut self, transport: impl UploadTransport) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// 设置参数来源；每次发送请求前按 id 取参数。
    pub fn params_source(mut self, source: impl ParamsSource + 'static) -> Self {
        self.params = Arc::new(source);
        self
    }

    /// 注册「开始上传」钩子。
    pub fn with_on_upload_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, &str) + Send + Sync + 'static,
    {
        self.hooks.add(OnUploadHookAdapter(f));
        self
    }

    /// 注册「进度」钩子；参数为 id、文件名、整个文件已上传字节数、文件总大小。
    pub fn with_on_progress_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, &str, u64, u64) + Send + Sync + 'static,
    {
        self.hooks.add(OnProgressHookAdapter(f));
        self
    }

    /// 注册「完成」钩子；参数中的响应文档为最后一次请求的解析结果。
    pub fn with_on_complete_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, &str, &ResponseDocument) + Send + Sync + 'static,
    {
        self.hooks.add(OnCompleteHookAdapter(f));
        self
    }

    /// 注册「取消」钩子。
    pub fn with_on_cancel_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, &str) + Send + Sync + 'static,
    {
        self.hooks.add(OnCancelHookAdapter(f));
        self
    }

    /// 注册「自动重试决策」钩子；返回 `true` 表示接管，稍后由钩子方调用 `retry`。
    pub fn with_on_auto_retry_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, &str, &ResponseDocument, &TransportReply) -> bool + Send + Sync + 'static,
    {
        self.hooks.add(OnAutoRetryHookAdapter(f));
        self
    }

    /// 注册「出队」钩子。
    pub fn with_on_dequeue_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.hooks.add(OnDequeueHookAdapter(f));
        self
    }

    /// 添加完整钩子；可多次调用，按注册顺序执行。
    pub fn with_hook(mut self, hook: impl UploadHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    /// 校验配置并创建处理器。
    pub fn build(self) -> Result<UploadHandler, UploadError> {
        let endpoint = Url::parse(&self.options.endpoint)
            .map_err(|e| UploadError::InvalidEndpoint(format!("{}: {e}", self.options.endpoint)))?;
        if self.options.enable_chunking && self.options.chunk_size == 0 {
            return Err(UploadError::InvalidChunkSize);
        }
        for (name, value) in &self.options.custom_headers {
            request_builder::validate_header(name, value)?;
        }

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::new()));

        Ok(UploadHandler {
            inner: Arc::new(HandlerInner {
                options: self.options,
                endpoint,
                transport,
                params: self.params,
                hooks: self.hooks,
                state: Mutex::new(HandlerState::default()),
            }),
        })
    }
}

/// 文件登记与只读查询
impl UploadHandler {
    /// 注册文件，返回其 id。
    pub fn add(&self, file: impl FileLike + 'static) -> FileId {
        self.add_shared(Arc::new(file))
    }

    /// 注册已共享的文件对象。
    pub fn add_shared(&self, file: Arc<dyn FileLike>) -> FileId {
        let mut state = self.state();
        let id = state.files.len();
        state.files.push(Some(FileRecord::new(file)));
        state.status.insert(id, UploadStatus::Idle);
        id
    }

    /// 文件名；记录已清除时返回 `None`。
    pub fn name(&self, id: FileId) -> Option<String> {
        self.state().record(id).map(|r| r.name.clone())
    }

    /// 文件大小；记录已清除时返回 `None`。
    pub fn size(&self, id: FileId) -> Option<u64> {
        self.state().record(id).map(|r| r.size)
    }

    /// 最近一次报告的整体已上传字节数。
    pub fn loaded(&self, id: FileId) -> u64 {
        self.state().progress.loaded(id)
    }

    /// 文件记录是否仍有效（未取消、未完成）。
    pub fn is_valid(&self, id: FileId) -> bool {
        self.state().record(id).is_some()
    }

    pub fn status(&self, id: FileId) -> Option<UploadStatus> {
        self.state().status_of(id)
    }

    /// 该 id 是否有在途请求句柄。
    pub fn is_transport_active(&self, id: FileId) -> bool {
        self.state().transports.is_active(id)
    }

    pub fn options(&self) -> &UploadOptions {
        &self.inner.options
    }

    /// 锁中毒时沿用内部数据。
    pub(crate) fn state(&self) -> MutexGuard<'_, HandlerState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
