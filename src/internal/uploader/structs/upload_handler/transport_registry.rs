//! 传输会话登记：每个文件 id 最多一个在途请求，取消时据此中止。

use std::collections::HashMap;

use tokio::task::AbortHandle;

/// 一次请求尝试的句柄。`attempt` 用来识别过期回调：句柄被替换或释放后，旧请求的回调一律忽略。
#[derive(Debug)]
struct TransportHandle {
    attempt: u64,
    abort: Option<AbortHandle>,
}

#[derive(Debug, Default)]
pub(crate) struct TransportRegistry {
    slots: HashMap<usize, TransportHandle>,
    next_attempt: u64,
}

impl TransportRegistry {
    /// 为新请求占位并返回尝试编号。
    ///
    /// 若该 id 仍留有旧句柄则直接替换而不中止：同一 id 的请求是串行的，
    /// 旧请求此时已经结束（重发往往就是在旧任务的回调里发起的）。
    pub(crate) fn begin(&mut self, id: usize) -> u64 {
        self.next_attempt += 1;
        let attempt = self.next_attempt;
        self.slots.insert(id, TransportHandle { attempt, abort: None });
        attempt
    }

    /// 任务已 spawn，挂上中止句柄。占位已被替换或释放时直接中止该任务。
    pub(crate) fn attach(&mut self, id: usize, attempt: u64, abort: AbortHandle) {
        match self.slots.get_mut(&id) {
            Some(slot) if slot.attempt == attempt => slot.abort = Some(abort),
            _ => abort.abort(),
        }
    }

    /// 回调是否来自该 id 当前的请求。
    pub(crate) fn is_current(&self, id: usize, attempt: u64) -> bool {
        self.slots.get(&id).is_some_and(|slot| slot.attempt == attempt)
    }

    pub(crate) fn is_active(&self, id: usize) -> bool {
        self.slots.contains_key(&id)
    }

    /// 请求正常结束后释放句柄（不中止任务，调用方就在该任务内）。
    pub(crate) fn release(&mut self, id: usize, attempt: u64) {
        if self.is_current(id, attempt) {
            self.slots.remove(&id);
        }
    }

    /// 中止并释放该 id 的请求。返回之前是否有在途请求。
    pub(crate) fn abort(&mut self, id: usize) -> bool {
        match self.slots.remove(&id) {
            Some(slot) => {
                if let Some(h) = slot.abort {
                    h.abort();
                }
                true
            }
            None => false,
        }
    }

    pub(crate) fn abort_all(&mut self) {
        for (_, slot) in self.slots.drain() {
            if let Some(h) = slot.abort {
                h.abort();
            }
        }
    }
}
