use serde::{Deserialize, Serialize};

/// 分片元数据在请求参数中使用的字段名。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChunkParamNames {
    /// 分片序号（从 0 开始）
    pub part_index: String,
    /// 分片在文件中的起始偏移
    pub part_byte_offset: String,
    /// 本分片字节数
    pub chunk_size: String,
    /// 文件总字节数
    pub total_file_size: String,
    /// 是否最后一片
    pub is_last: String,
}

impl Default for ChunkParamNames {
    fn default() -> Self {
        Self {
            part_index: "qqpartindex".to_string(),
            part_byte_offset: "qqpartbyteoffset".to_string(),
            chunk_size: "qqchunksize".to_string(),
            total_file_size: "qqtotalfilesize".to_string(),
            is_last: "qqislast".to_string(),
        }
    }
}
