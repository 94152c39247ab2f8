//! 文件类 blob 领域模块：文件抽象、切片能力探测、惰性字节区间视图。
//!
//! 对外导出以 [`crate::blob`] 为准，此处仅做模块划分。

pub mod slicer;
pub mod structs;
pub mod traits;
