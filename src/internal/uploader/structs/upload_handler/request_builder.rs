//! 请求构建：方法、地址（查询参数）、请求头、请求体。
//!
//! - 参数不在请求体时，参数与文件名一起编码进查询串；
//! - 参数在请求体或强制 multipart 时，使用 multipart 表单；否则为原始二进制请求体，
//!   并带上 `Content-Type` 与 `X-Mime-Type`；
//! - 自定义请求头最后设置，可覆盖内置头。

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::internal::blob::structs::blob_slice::BlobSlice;
use crate::internal::transport::structs::upload_request::{RequestBody, UploadRequest};
use crate::internal::uploader::structs::upload_error::UploadError;
use crate::internal::uploader::structs::upload_options::UploadOptions;
use crate::internal::uploader::traits::params_source::Params;

/// 与浏览器 `encodeURIComponent` 一致：字母数字与 `-_.!~*'()` 不编码。
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const OCTET_STREAM: &str = "application/octet-stream";

/// 本次请求对应的分片元数据。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkMeta {
    pub part: usize,
    pub start: u64,
    pub len: u64,
    pub total: u64,
    pub is_last: bool,
}

/// 构建请求时的参数（形参超过 3 个，用 struct 承载）。
pub struct BuildRequestParams<'a> {
    pub options: &'a UploadOptions,
    pub endpoint: &'a Url,
    pub file_name: &'a str,
    pub mime_type: Option<&'a str>,
    pub params: Params,
    pub payload: BlobSlice,
    pub chunk: Option<ChunkMeta>,
}

/// 按配置构建一次上传请求。
pub fn build_upload_request(p: BuildRequestParams<'_>) -> Result<UploadRequest, UploadError> {
    let options = p.options;
    let mut params = p.params;

    if let Some(chunk) = p.chunk {
        let names = &options.chunk_param_names;
        params.insert(names.part_index.clone(), chunk.part.to_string());
        params.insert(names.part_byte_offset.clone(), chunk.start.to_string());
        params.insert(names.chunk_size.clone(), chunk.len.to_string());
        params.insert(names.total_file_size.clone(), chunk.total.to_string());
        params.insert(names.is_last.clone(), chunk.is_last.to_string());
    }

    let mut url = p.endpoint.clone();
    if !options.params_in_body {
        params.insert(options.input_name.clone(), p.file_name.to_string());
        append_query(&mut url, &params);
    }

    let method = if options.demo_mode {
        Method::GET
    } else {
        Method::POST
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(
        HeaderName::from_static("x-file-name"),
        header_value(&encode_uri_component(p.file_name))?,
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    let body = if options.uses_multipart() {
        let fields = if options.params_in_body {
            params.into_iter().collect()
        } else {
            Vec::new()
        };
        RequestBody::Multipart {
            fields,
            file_field: options.input_name.clone(),
            file_name: p.file_name.to_string(),
            mime_type: p.mime_type.map(str::to_string),
            payload: p.payload,
        }
    } else {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(OCTET_STREAM));
        headers.insert(
            HeaderName::from_static("x-mime-type"),
            header_value(p.mime_type.unwrap_or(OCTET_STREAM))?,
        );
        RequestBody::Raw(p.payload)
    };

    for (name, value) in &options.custom_headers {
        let (name, value) = validate_header(name, value)?;
        headers.insert(name, value);
    }

    Ok(UploadRequest {
        method,
        url,
        headers,
        body,
    })
}

/// 与浏览器 `encodeURIComponent` 相同的编码。
pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// 把参数按 `encodeURIComponent` 编码后追加到地址已有的查询串之后（空格编码为 `%20`）。
fn append_query(url: &mut Url, params: &Params) {
    if params.is_empty() {
        return;
    }
    let pairs = params
        .iter()
        .map(|(k, v)| format!("{}={}", encode_uri_component(k), encode_uri_component(v)))
        .collect::<Vec<_>>()
        .join("&");
    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{pairs}"),
        _ => pairs,
    };
    url.set_query(Some(&query));
}

/// 检查自定义请求头的名称与取值是否合法。
pub(crate) fn validate_header(
    name: &str,
    value: &str,
) -> Result<(HeaderName, HeaderValue), UploadError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| UploadError::InvalidHeader(format!("{name}: {e}")))?;
    Ok((header_name, header_value(value)?))
}

fn header_value(value: &str) -> Result<HeaderValue, UploadError> {
    HeaderValue::from_str(value).map_err(|e| UploadError::InvalidHeader(format!("{value}: {e}")))
}
