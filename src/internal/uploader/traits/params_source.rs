use std::collections::BTreeMap;

/// 请求参数表：键值对，按键排序以保证请求可复现。
pub type Params = BTreeMap<String, String>;

/// 参数来源：每次发送请求前按文件 id 取一次参数。
///
/// 闭包 `Fn(usize) -> Params` 与固定的 [`Params`] 都实现了本 trait。
pub trait ParamsSource: Send + Sync {
    fn params(&self, id: usize) -> Params;
}

impl ParamsSource for Params {
    fn params(&self, _id: usize) -> Params {
        self.clone()
    }
}

impl<F> ParamsSource for F
where
    F: Fn(usize) -> Params + Send + Sync,
{
    fn params(&self, id: usize) -> Params {
        self(id)
    }
}
