//! 取消与重置：在途请求被中止、迟到的回调被丢弃、钩子内取消。

use std::sync::{Arc, OnceLock};

use crate::blob::MemoryFile;
use crate::tests::{
    Event, HandlerSlot, OK_BODY, RecordingHook, ScriptedTransport, sample_bytes, wait_for_dequeue,
    wait_until,
};
use crate::transport::TransportReply;
use crate::uploader::{UploadHandler, UploadOptions, UploadStatus};

const ENDPOINT: &str = "https://example.com/upload";

#[tokio::test]
async fn cancel_in_flight_chunk_stops_everything() {
    let transport = ScriptedTransport::new().hold();
    let hook = RecordingHook::new();
    let handler = UploadHandler::builder(UploadOptions::new(ENDPOINT).chunked(400))
        .transport(transport.clone())
        .with_hook(hook.clone())
        .build()
        .unwrap();

    let id = handler.add(MemoryFile::new("a.bin", sample_bytes(1000)));
    handler.upload(id).unwrap();
    wait_until(|| transport.request_count() == 1).await;
    assert_eq!(handler.status(id), Some(UploadStatus::ChunkInFlight { part: 0 }));
    assert!(handler.is_transport_active(id));

    handler.cancel(id);

    assert_eq!(hook.events().last(), Some(&Event::Cancel(id)));
    assert_eq!(handler.status(id), Some(UploadStatus::Cancelled));
    assert!(!handler.is_transport_active(id));
    assert!(!handler.is_valid(id));

    // 取消后迟到的进度与响应都不会产生事件
    let before = hook.events();
    handler.on_transport_progress(id, 1, 300);
    handler.on_transport_complete(id, 1, Ok(TransportReply::new(200, OK_BODY)));
    tokio::task::yield_now().await;
    assert_eq!(hook.events(), before);
    assert_eq!(transport.request_count(), 1);
    assert_eq!(hook.count(|e| matches!(e, Event::Complete(..) | Event::Dequeue(_))), 0);
}

#[tokio::test]
async fn cancel_is_idempotent_and_ignored_after_completion() {
    let transport = ScriptedTransport::new();
    let hook = RecordingHook::new();
    let handler = UploadHandler::builder(UploadOptions::new(ENDPOINT))
        .transport(transport.clone())
        .with_hook(hook.clone())
        .build()
        .unwrap();

    let idle = handler.add(MemoryFile::new("idle.bin", sample_bytes(10)));
    handler.cancel(idle);
    handler.cancel(idle);
    assert_eq!(hook.count(|e| *e == Event::Cancel(idle)), 1);
    assert_eq!(handler.status(idle), Some(UploadStatus::Cancelled));
    assert!(handler.upload(idle).is_ok());
    assert_eq!(transport.request_count(), 0);

    let done = handler.add(MemoryFile::new("done.bin", sample_bytes(10)));
    handler.upload(done).unwrap();
    wait_for_dequeue(&hook, done).await;
    handler.cancel(done);
    assert_eq!(hook.count(|e| *e == Event::Cancel(done)), 0);
    assert_eq!(handler.status(done), Some(UploadStatus::Completed));
}

#[tokio::test]
async fn cancel_from_progress_hook() {
    let slot: HandlerSlot = Arc::new(OnceLock::new());
    let transport = ScriptedTransport::new().with_progress();
    let hook = RecordingHook::new();
    let handler = UploadHandler::builder(UploadOptions::new(ENDPOINT).chunked(400))
        .transport(transport.clone())
        .with_hook(hook.clone())
        .with_on_progress_hook({
            let slot = Arc::clone(&slot);
            move |id, _name, loaded, _total| {
                if loaded >= 600 {
                    if let Some(handler) = slot.get() {
                        handler.cancel(id);
                    }
                }
            }
        })
        .build()
        .unwrap();
    slot.set(handler.clone()).unwrap();

    let id = handler.add(MemoryFile::new("a.bin", sample_bytes(1000)));
    handler.upload(id).unwrap();
    wait_until(|| hook.has(&Event::Cancel(id))).await;
    tokio::task::yield_now().await;

    assert_eq!(transport.request_count(), 2);
    assert_eq!(hook.progress_of(id).last(), Some(&(600, 1000)));
    assert!(hook.completions_of(id).is_empty());
    assert!(!hook.has(&Event::Dequeue(id)));
    assert_eq!(handler.status(id), Some(UploadStatus::Cancelled));
}

#[tokio::test]
async fn reset_clears_all_files_but_keeps_ids_unique() {
    let transport = ScriptedTransport::new().hold();
    let hook = RecordingHook::new();
    let handler = UploadHandler::builder(UploadOptions::new(ENDPOINT).chunked(400))
        .transport(transport.clone())
        .with_hook(hook.clone())
        .build()
        .unwrap();

    let a = handler.add(MemoryFile::new("a.bin", sample_bytes(1000)));
    let b = handler.add(MemoryFile::new("b.bin", sample_bytes(10)));
    handler.upload(a).unwrap();
    handler.upload(b).unwrap();
    wait_until(|| transport.request_count() == 2).await;

    handler.reset();

    for id in [a, b] {
        assert!(!handler.is_valid(id));
        assert!(!handler.is_transport_active(id));
        assert_eq!(handler.status(id), None);
        assert_eq!(handler.loaded(id), 0);
    }
    assert!(hook.completions_of(a).is_empty());

    let c = handler.add(MemoryFile::new("c.bin", sample_bytes(10)));
    assert_eq!(c, 2);
    assert_eq!(handler.status(c), Some(UploadStatus::Idle));
}
