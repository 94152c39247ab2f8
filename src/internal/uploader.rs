//! 上传器领域模块：分片上传状态机、配置、钩子与响应解析。
//!
//! 使用方式：`UploadHandler::builder(options).with_hook(hook).build()?`，
//! 之后 `add` 注册文件、`upload` 开始上传、`cancel` 取消、`retry` 重发。
//! 对外导出以 [`crate::uploader`] 为准，此处仅做模块划分。

pub mod structs;
pub mod traits;
