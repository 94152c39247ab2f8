//! 响应解析：宽松地把响应体解析成键值文档，并判定成败。

use serde_json::Value;

use crate::internal::uploader::structs::response_document::{ResponseDocument, ResponseOutcome};

/// 本传输约定的成功状态码。
pub const SUCCESS_STATUS: u16 = 200;

/// 解析响应体。不是 JSON 对象时记录错误日志并返回空文档，不向上抛出。
pub fn parse_response_document(body: &str) -> ResponseDocument {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ResponseDocument::new(map),
        Ok(other) => {
            tracing::error!(kind = value_kind(&other), "响应体不是 JSON 对象，按空文档处理");
            ResponseDocument::empty()
        }
        Err(e) => {
            tracing::error!(error = %e, "解析响应体失败，按空文档处理");
            ResponseDocument::empty()
        }
    }
}

/// 状态码为 200 且 `success` 为真值才算成功。
pub fn classify(status: u16, response: &ResponseDocument) -> ResponseOutcome {
    if status == SUCCESS_STATUS && response.is_success() {
        ResponseOutcome::Success
    } else {
        ResponseOutcome::Failed
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
