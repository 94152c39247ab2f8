//! 上传相关错误类型。
//!
//! 只有「开始之前」的失败会以 `Err` 返回（构建处理器、开始上传、重发）；
//! 请求一旦发出，成败都通过钩子事件流告知，不再走错误返回。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("上传地址无效: {0}")]
    InvalidEndpoint(String),

    #[error("分片大小必须大于 0")]
    InvalidChunkSize,

    /// 文件既不在内存中也不在磁盘上，无法切片
    #[error("文件 {0} 不支持任何切片方式")]
    NoSliceCapability(String),

    #[error("仅支持文件上传，当前为目录: {0}")]
    IsDir(String),

    #[error("读取文件数据失败: {0}")]
    ReadBlob(std::io::Error),

    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("请求头无效: {0}")]
    InvalidHeader(String),

    #[error("MIME 类型无效: {0}")]
    InvalidMimeType(reqwest::Error),
}
