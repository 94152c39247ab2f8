//! 进度聚合：已确认分片的字节数 + 当前请求的在途字节数，换算成整个文件的进度。

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
struct FileProgress {
    /// 已被服务端确认的分片字节数之和
    confirmed: u64,
    /// 最近一次对外报告的 loaded
    reported: u64,
    total: u64,
}

/// 按文件 id 记录进度。对外报告的值单调不减，且在途进度永远不会报告到 100%：
/// `loaded == total` 只在收尾时由 [`finish`](Self::finish) 报告一次。
#[derive(Debug, Default)]
pub(crate) struct ProgressAggregator {
    files: HashMap<usize, FileProgress>,
}

impl ProgressAggregator {
    /// 文件开始上传：计数清零。
    pub(crate) fn reset(&mut self, id: usize, total: u64) {
        self.files.insert(
            id,
            FileProgress {
                confirmed: 0,
                reported: 0,
                total,
            },
        );
    }

    /// 传输层报告当前请求已发送 `sent` 字节。需要对外报告时返回 `(loaded, total)`。
    pub(crate) fn in_flight(&mut self, id: usize, sent: u64) -> Option<(u64, u64)> {
        let p = self.files.get_mut(&id)?;
        let loaded = p.confirmed.saturating_add(sent).min(p.total);
        if loaded <= p.reported || loaded >= p.total {
            return None;
        }
        p.reported = loaded;
        Some((loaded, p.total))
    }

    /// 一个分片被服务端确认。
    pub(crate) fn confirm(&mut self, id: usize, chunk_len: u64) {
        if let Some(p) = self.files.get_mut(&id) {
            p.confirmed = p.confirmed.saturating_add(chunk_len).min(p.total);
            p.reported = p.reported.max(p.confirmed);
        }
    }

    /// 收尾：强制报告 100%，返回 `(total, total)`。
    pub(crate) fn finish(&mut self, id: usize) -> Option<(u64, u64)> {
        let p = self.files.get_mut(&id)?;
        p.confirmed = p.total;
        p.reported = p.total;
        Some((p.total, p.total))
    }

    /// 最近一次对外报告的 loaded。
    pub(crate) fn loaded(&self, id: usize) -> u64 {
        self.files.get(&id).map(|p| p.reported).unwrap_or(0)
    }

    pub(crate) fn remove(&mut self, id: usize) {
        self.files.remove(&id);
    }

    pub(crate) fn clear(&mut self) {
        self.files.clear();
    }
}
