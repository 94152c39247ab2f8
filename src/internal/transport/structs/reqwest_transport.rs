//! 基于 reqwest 的默认传输实现。
//!
//! 请求体统一包装成流，按 [`STREAM_PIECE_SIZE`] 逐段从数据视图读出并交给 hyper，每交出一段就回报一次进度；
//! multipart 与原始二进制两种请求体都走同一条流。本地文件区间不会整体读入内存。

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{CONTENT_LENGTH, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};

use crate::internal::blob::structs::blob_slice::BlobStream;
use crate::internal::transport::structs::{
    ProgressReporter, RequestBody, TransportReply, UploadRequest,
};
use crate::internal::transport::traits::upload_transport::UploadTransport;
use crate::internal::uploader::structs::upload_error::UploadError;

/// 每次交给 hyper 的数据段大小（64KB），也是进度回报的粒度。
pub const STREAM_PIECE_SIZE: usize = 64 * 1024;

/// reqwest 传输。`Client` 内部是 Arc，克隆开销很小；超时等配置请在 `Client` 上设置。
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用调用方配置好的 `Client`（超时、代理、默认头等）。
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// 把上传请求翻译成 reqwest 请求。`body` 为已包装好的请求体流，`len` 为其总长度。
    pub(crate) fn build_request(
        &self,
        request: UploadRequest,
        body: Body,
        len: u64,
    ) -> Result<reqwest::Request, UploadError> {
        let builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        let builder = match request.body {
            RequestBody::Multipart {
                fields,
                file_field,
                file_name,
                mime_type,
                ..
            } => {
                let mut part = Part::stream_with_length(body, len).file_name(file_name);
                if let Some(mime) = mime_type {
                    part = part.mime_str(&mime).map_err(UploadError::InvalidMimeType)?;
                }
                let form = fields
                    .into_iter()
                    .fold(Form::new(), |form, (key, value)| form.text(key, value))
                    .part(file_field, part);
                builder.multipart(form)
            }
            RequestBody::Raw(_) => builder
                .header(CONTENT_LENGTH, HeaderValue::from(len))
                .body(body),
        };

        Ok(builder.build()?)
    }
}

/// 包装成请求体流，每交出一段回报一次本请求的累计发送字节数。
fn progress_body(pieces: BlobStream, progress: ProgressReporter) -> Body {
    let mut sent: u64 = 0;
    Body::wrap_stream(pieces.map(move |piece| {
        if let Ok(bytes) = &piece {
            sent += bytes.len() as u64;
            progress.report(sent);
        }
        piece
    }))
}

#[async_trait]
impl UploadTransport for ReqwestTransport {
    async fn send(
        &self,
        request: UploadRequest,
        progress: ProgressReporter,
    ) -> Result<TransportReply, UploadError> {
        let payload = request.body.payload();
        let len = payload.len();
        let pieces = payload.stream(STREAM_PIECE_SIZE).await?;
        let http_request = self.build_request(request, progress_body(pieces, progress), len)?;

        let resp = self.client.execute(http_request).await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(TransportReply::new(status, body))
    }
}
