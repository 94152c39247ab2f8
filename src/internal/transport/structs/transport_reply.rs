/// 传输层返回的原始响应：状态码与响应体文本，未做任何解析。
///
/// 传输本身失败（连接中断、DNS 错误等）时以 [`TransportReply::failed`] 表示，状态码为 0。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

impl TransportReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 传输失败时的占位响应。
    pub fn failed() -> Self {
        Self::default()
    }
}
