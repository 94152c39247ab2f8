use reqwest::Method;
use reqwest::header::HeaderMap;
use url::Url;

use crate::internal::blob::structs::blob_slice::BlobSlice;

/// 一次上传请求：由状态机构建，交给 [`UploadTransport`](crate::transport::UploadTransport) 发送。
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub method: Method,
    /// 已拼好查询参数的完整地址
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

/// 请求体。
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// multipart 表单：每个参数一个文本字段，外加一个承载数据的文件字段
    Multipart {
        fields: Vec<(String, String)>,
        file_field: String,
        file_name: String,
        mime_type: Option<String>,
        payload: BlobSlice,
    },
    /// 原始二进制请求体，参数已转移到地址的查询串
    Raw(BlobSlice),
}

impl RequestBody {
    /// 请求携带的数据视图。
    pub fn payload(&self) -> &BlobSlice {
        match self {
            RequestBody::Multipart { payload, .. } => payload,
            RequestBody::Raw(payload) => payload,
        }
    }
}
