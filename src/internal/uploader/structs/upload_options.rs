use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::chunk_param_names::ChunkParamNames;

/// 默认分片大小：2MB
pub const DEFAULT_CHUNK_SIZE: u64 = 2_000_000;

/// 默认文件字段名（表单字段 / 查询参数中的文件名）
pub const DEFAULT_INPUT_NAME: &str = "qqfile";

/// 上传配置。对状态机只读；可直接链式构建，也可从 JSON 等格式反序列化（字段为 camelCase，缺省取默认值）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UploadOptions {
    /// 上传地址（绝对 URL）
    pub endpoint: String,
    /// 是否启用分片
    pub enable_chunking: bool,
    /// 每个分片的大小（字节），必须大于 0
    pub chunk_size: u64,
    /// 分片元数据字段名
    pub chunk_param_names: ChunkParamNames,
    /// 文件字段名
    pub input_name: String,
    /// 参数放在请求体（multipart 字段）而非查询串
    pub params_in_body: bool,
    /// 即使参数在查询串，也强制使用 multipart 请求体
    pub force_multipart: bool,
    /// 自定义请求头，最后设置，可覆盖内置头
    pub custom_headers: BTreeMap<String, String>,
    /// 演示模式：改用 GET 发送，仅用于演示和测试
    pub demo_mode: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            enable_chunking: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_param_names: ChunkParamNames::default(),
            input_name: DEFAULT_INPUT_NAME.to_string(),
            params_in_body: false,
            force_multipart: false,
            custom_headers: BTreeMap::new(),
            demo_mode: false,
        }
    }
}

impl UploadOptions {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// 启用分片并设置分片大小（字节）。
    pub fn chunked(mut self, chunk_size: u64) -> Self {
        self.enable_chunking = true;
        self.chunk_size = chunk_size;
        self
    }

    /// 设置文件字段名。
    pub fn input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = name.into();
        self
    }

    /// 参数放进 multipart 请求体。
    pub fn params_in_body(mut self, enabled: bool) -> Self {
        self.params_in_body = enabled;
        self
    }

    /// 强制使用 multipart 请求体。
    pub fn force_multipart(mut self, enabled: bool) -> Self {
        self.force_multipart = enabled;
        self
    }

    /// 添加一个自定义请求头。
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(name.into(), value.into());
        self
    }

    /// 设置分片元数据字段名。
    pub fn chunk_param_names(mut self, names: ChunkParamNames) -> Self {
        self.chunk_param_names = names;
        self
    }

    pub fn demo_mode(mut self, enabled: bool) -> Self {
        self.demo_mode = enabled;
        self
    }

    /// 请求体是否使用 multipart。
    pub(crate) fn uses_multipart(&self) -> bool {
        self.force_multipart || self.params_in_body
    }
}
