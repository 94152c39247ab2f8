use serde_json::{Map, Value};

/// 服务端响应体解析后的键值文档。解析失败时为空文档。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseDocument(Map<String, Value>);

impl ResponseDocument {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `success` 字段是否为真值；缺失视为假。
    pub fn is_success(&self) -> bool {
        self.get("success").is_some_and(is_truthy)
    }
}

/// 响应分类结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Success,
    Failed,
}

/// JSON 值的真值判断：`null`、`false`、`0`、`NaN` 与空字符串为假，其余（含空数组、空对象）为真。
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
