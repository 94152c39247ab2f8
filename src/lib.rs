/// 内部导出的模块
mod internal;


/// 文件对象与切片：内存文件、本地文件，以及按能力选择的切片器
pub mod blob {
    use crate::internal;
    pub use internal::blob::slicer::{
        BlobSlicer, LocalPathSlice, SLICE_CAPABILITIES, SharedBytesSlice, SliceCapability,
    };
    pub use internal::blob::structs::*;
    pub use internal::blob::traits::file_like::FileLike;
}

/// 传输层：请求模型、进度上报与默认的 reqwest 实现。自定义传输实现 [`UploadTransport`](transport::UploadTransport) 即可
pub mod transport {
    use crate::internal;
    pub use internal::transport::structs::*;
    pub use internal::transport::traits::upload_transport::UploadTransport;
}

/// 上传处理器：配置、状态、钩子与响应文档
pub mod uploader {
    use crate::internal;
    pub use internal::uploader::structs::*;
    pub use internal::uploader::structs::response_document::is_truthy;
    pub use internal::uploader::structs::upload_handler::{
        ChunkMeta, SUCCESS_STATUS, classify, encode_uri_component, parse_response_document,
        plan_byte_ranges,
    };
    pub use internal::uploader::structs::upload_options::{DEFAULT_CHUNK_SIZE, DEFAULT_INPUT_NAME};
    pub use internal::uploader::traits::params_source::{Params, ParamsSource};
    pub use internal::uploader::traits::upload_hook::UploadHook;
}
