//! 上传状态机：开始、发送、进度、完成、重试、取消。
//!
//! 所有状态判断与修改都在持锁期间一次完成；钩子一律在释放锁之后调用。
//! 每次请求在独立的 tokio 任务中执行，下一个分片只会在上一个分片的完成回调里发出，
//! 因此同一个 id 的请求严格串行。

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::internal::blob::slicer::BlobSlicer;
use crate::internal::transport::structs::progress_reporter::ProgressReporter;
use crate::internal::transport::structs::transport_reply::TransportReply;
use crate::internal::uploader::structs::file_record::FileRecord;
use crate::internal::uploader::structs::response_document::{ResponseDocument, ResponseOutcome};
use crate::internal::uploader::structs::upload_error::UploadError;
use crate::internal::uploader::structs::upload_status::UploadStatus;

use super::byte_range_planner::build_chunk_queue;
use super::request_builder::{BuildRequestParams, ChunkMeta, build_upload_request};
use super::response_interpreter::{classify, parse_response_document};
use super::{FileId, TransferPlan, UploadHandler};

/// 收到响应后，释放锁之前决定好的下一步。
enum NextStep {
    /// 全部完成，报告 `(total, total)` 后触发完成事件
    Finalize { total: u64 },
    /// 发送队列中的下一个分片
    SendNext,
    /// 服务端返回失败，询问重试钩子
    AskRetry,
}

/// 外部接口：开始、重发、取消、重置
impl UploadHandler {
    /// 开始上传。
    ///
    /// 启用分片且文件非空时先生成完整的分片队列，否则整文件一次发送（空文件总是整文件发送）。
    /// 之后清零进度，触发 `on_upload` 与一次 `loaded = 0` 的进度事件，再发出第一个请求。
    ///
    /// 记录已清除的 id、或已在上传中的 id 直接忽略。检查与认领（`Starting`）在同一次持锁内完成，
    /// 并发调用只有一个能继续。找不到切片能力时返回错误，不产生任何事件；
    /// 第一个请求无法构建时按失败处理（`Failed`、完成事件、出队）并返回错误。
    pub fn upload(&self, id: FileId) -> Result<(), UploadError> {
        let (record, previous) = {
            let mut state = self.state();
            let Some(record) = state.record(id).cloned() else {
                debug!(id, "文件记录不存在或已清除，忽略 upload");
                return Ok(());
            };
            let previous = state.status_of(id);
            if previous.is_some_and(|s| s.is_busy()) {
                debug!(id, "文件已在上传中，忽略 upload");
                return Ok(());
            }
            state.status.insert(id, UploadStatus::Starting);
            (record, previous)
        };

        let plan = match self.plan_transfer(&record) {
            Ok(plan) => plan,
            Err(e) => {
                let mut state = self.state();
                if state.status_of(id) == Some(UploadStatus::Starting) {
                    match previous {
                        Some(status) => state.status.insert(id, status),
                        None => state.status.remove(&id),
                    };
                }
                return Err(e);
            }
        };

        {
            let mut state = self.state();
            if state.record(id).is_none() || state.status_of(id) != Some(UploadStatus::Starting) {
                debug!(id, "规划期间文件已取消或重置，放弃 upload");
                return Ok(());
            }
            if let TransferPlan::Chunked(queue) = &plan {
                debug!(id, parts = queue.len(), "分片队列已生成");
            }
            state.progress.reset(id, record.size);
            state.plans.insert(id, plan);
        }

        self.inner.hooks.run_on_upload(id, &record.name);
        self.inner
            .hooks
            .run_on_progress(id, &record.name, 0, record.size);

        if let Err(e) = self.send_current(id, |s| s == Some(UploadStatus::Starting)) {
            error!(id, error = %e, "发送第一个请求失败");
            self.fail(id, &record.name, &ResponseDocument::empty(), |s| {
                s == Some(UploadStatus::Starting)
            });
            return Err(e);
        }
        Ok(())
    }

    /// 重发当前分片（分片上传时为队首分片，否则为整个文件），不重新规划。
    ///
    /// 只在 `RetryRequested`（重试钩子接管后）或 `Failed`（手动重试）状态下有效，其余状态忽略。
    pub fn retry(&self, id: FileId) -> Result<(), UploadError> {
        debug!(id, "重发当前请求");
        self.send_current(id, |s| {
            matches!(s, Some(UploadStatus::RetryRequested | UploadStatus::Failed))
        })
    }

    /// 取消上传：清除文件记录、中止并释放在途请求、清空分片队列，然后触发 `on_cancel`。
    ///
    /// 已完成、已取消或不存在的 id 忽略。取消后迟到的进度与完成回调都会被丢弃。
    pub fn cancel(&self, id: FileId) {
        let name = {
            let mut guard = self.state();
            let state = &mut *guard;
            let Some(record) = state.files.get_mut(id).and_then(Option::take) else {
                debug!(id, "文件记录不存在或已清除，忽略 cancel");
                return;
            };
            let aborted = state.transports.abort(id);
            state.plans.remove(&id);
            state.progress.remove(id);
            state.status.insert(id, UploadStatus::Cancelled);
            debug!(id, aborted, "在途请求已中止");
            record.name
        };

        info!(id, name = %name, "上传已取消");
        self.inner.hooks.run_on_cancel(id, &name);
    }

    /// 中止全部请求并清除全部文件记录。已分配的 id 不会复用。
    pub fn reset(&self) {
        let mut state = self.state();
        state.transports.abort_all();
        for slot in state.files.iter_mut() {
            *slot = None;
        }
        state.plans.clear();
        state.progress.clear();
        state.status.clear();
    }
}

/// 内部实现：规划、发送与回调
impl UploadHandler {
    /// 生成传输计划：启用分片且文件非空时为分片队列，否则为整个文件。
    fn plan_transfer(&self, record: &FileRecord) -> Result<TransferPlan, UploadError> {
        let options = &self.inner.options;
        let file = record.file.as_ref();
        if options.enable_chunking && record.size > 0 {
            Ok(TransferPlan::Chunked(build_chunk_queue(
                file,
                record.size,
                options.chunk_size,
            )?))
        } else {
            let slicer = BlobSlicer::for_file(file)?;
            Ok(TransferPlan::Single(slicer.slice(file, 0, record.size)?))
        }
    }

    /// 按当前计划发送一个请求：分片上传发队首分片，否则发整个文件。
    ///
    /// `precondition` 在持锁期间对当前状态求值，不满足则什么也不做。
    pub(crate) fn send_current<P>(&self, id: FileId, precondition: P) -> Result<(), UploadError>
    where
        P: FnOnce(Option<UploadStatus>) -> bool,
    {
        let params = self.inner.params.params(id);

        let (request, attempt) = {
            let mut state = self.state();
            let Some(record) = state.record(id).cloned() else {
                return Ok(());
            };
            if !precondition(state.status_of(id)) {
                debug!(id, status = ?state.status_of(id), "当前状态不允许发送，忽略");
                return Ok(());
            }

            let (payload, chunk, status) = match state.plans.get(&id) {
                Some(TransferPlan::Single(blob)) => (blob.clone(), None, UploadStatus::Uploading),
                Some(TransferPlan::Chunked(queue)) => match queue.front() {
                    Some(front) => (
                        front.blob.clone(),
                        Some(ChunkMeta {
                            part: front.part,
                            start: front.start,
                            len: front.len(),
                            total: record.size,
                            is_last: queue.len() == 1,
                        }),
                        UploadStatus::ChunkInFlight { part: front.part },
                    ),
                    None => return Ok(()),
                },
                None => return Ok(()),
            };

            let request = build_upload_request(BuildRequestParams {
                options: &self.inner.options,
                endpoint: &self.inner.endpoint,
                file_name: &record.name,
                mime_type: record.file.mime_type(),
                params,
                payload,
                chunk,
            })?;

            let attempt = state.transports.begin(id);
            state.status.insert(id, status);
            (request, attempt)
        };

        debug!(id, attempt, method = %request.method, url = %request.url, "发送上传请求");

        let reporter = {
            let handler = self.clone();
            ProgressReporter::new(move |sent| handler.on_transport_progress(id, attempt, sent))
        };
        let handler = self.clone();
        let transport = Arc::clone(&self.inner.transport);
        let task = tokio::spawn(async move {
            let result = transport.send(request, reporter).await;
            handler.on_transport_complete(id, attempt, result);
        });

        self.state()
            .transports
            .attach(id, attempt, task.abort_handle());
        Ok(())
    }

    /// 传输层报告当前请求已发送 `sent` 字节。
    pub(crate) fn on_transport_progress(&self, id: FileId, attempt: u64, sent: u64) {
        let event = {
            let mut state = self.state();
            if !state.transports.is_current(id, attempt) {
                return;
            }
            let Some(name) = state.record(id).map(|r| r.name.clone()) else {
                return;
            };
            state
                .progress
                .in_flight(id, sent)
                .map(|(loaded, total)| (name, loaded, total))
        };

        if let Some((name, loaded, total)) = event {
            self.inner.hooks.run_on_progress(id, &name, loaded, total);
        }
    }

    /// 请求结束（无论成败）。文件已取消或回调已过期时什么也不做。
    pub(crate) fn on_transport_complete(
        &self,
        id: FileId,
        attempt: u64,
        result: Result<TransportReply, UploadError>,
    ) {
        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!(id, attempt, error = %e, "传输失败，按状态码 0 处理");
                TransportReply::failed()
            }
        };

        let (name, response, step) = {
            let mut guard = self.state();
            let state = &mut *guard;
            let Some(name) = state.record(id).map(|r| r.name.clone()) else {
                debug!(id, "文件已取消，丢弃响应");
                return;
            };
            if !state.transports.is_current(id, attempt) {
                debug!(id, attempt, "过期的响应，丢弃");
                return;
            }

            debug!(id, status = reply.status, "收到服务端响应");
            debug!(id, body = %reply.body, "响应体");
            let response = parse_response_document(&reply.body);

            let step = match classify(reply.status, &response) {
                ResponseOutcome::Failed => {
                    state.transports.release(id, attempt);
                    state.status.insert(id, UploadStatus::RetryRequested);
                    NextStep::AskRetry
                }
                ResponseOutcome::Success => {
                    let remaining = match state.plans.get_mut(&id) {
                        Some(TransferPlan::Chunked(queue)) => {
                            if let Some(done) = queue.pop_front() {
                                state.progress.confirm(id, done.len());
                                debug!(id, part = done.part, remaining = queue.len(), "分片已确认");
                            }
                            queue.len()
                        }
                        _ => 0,
                    };

                    if remaining > 0 {
                        state.transports.release(id, attempt);
                        NextStep::SendNext
                    } else {
                        let (total, _) = state.progress.finish(id).unwrap_or((0, 0));
                        state.files[id] = None;
                        state.plans.remove(&id);
                        state.status.insert(id, UploadStatus::Completed);
                        NextStep::Finalize { total }
                    }
                }
            };
            (name, response, step)
        };

        match step {
            NextStep::Finalize { total } => {
                self.inner.hooks.run_on_progress(id, &name, total, total);
                self.inner.hooks.run_on_complete(id, &name, &response);
                self.state().transports.release(id, attempt);
                info!(id, name = %name, total, "上传完成");
                self.inner.hooks.run_on_dequeue(id);
            }
            NextStep::SendNext => {
                if let Err(e) = self.send_current(id, |s| s.is_some_and(|s| s.is_sending())) {
                    error!(id, error = %e, "发送下一个分片失败");
                    self.fail(id, &name, &ResponseDocument::empty(), |s| {
                        s.is_some_and(|s| s.is_sending())
                    });
                }
            }
            NextStep::AskRetry => {
                if self
                    .inner
                    .hooks
                    .run_on_auto_retry(id, &name, &response, &reply)
                {
                    debug!(id, "重试已交由钩子处理");
                    return;
                }
                self.fail(id, &name, &response, |s| s == Some(UploadStatus::RetryRequested));
            }
        }
    }

    /// 失败且不重试：标记 `Failed`，以失败的响应文档触发完成事件，然后出队。
    ///
    /// 文件记录与分片队列保留，之后仍可 `retry` 或 `cancel`。
    /// `precondition` 不满足（例如钩子返回前已自行重发或取消）时什么也不做。
    fn fail<P>(&self, id: FileId, name: &str, response: &ResponseDocument, precondition: P)
    where
        P: FnOnce(Option<UploadStatus>) -> bool,
    {
        {
            let mut state = self.state();
            if state.record(id).is_none() || !precondition(state.status_of(id)) {
                return;
            }
            state.status.insert(id, UploadStatus::Failed);
        }

        warn!(id, name = %name, "上传失败");
        self.inner.hooks.run_on_complete(id, name, response);
        self.inner.hooks.run_on_dequeue(id);
    }
}
