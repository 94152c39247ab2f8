//! 传输层：请求/响应的抽象接口，以及基于 reqwest 的默认实现。

pub mod structs;
pub mod traits;
