//! 联网测试：向 `live.env` 中配置的真实地址分片上传一个内存文件。未配置时跳过。

use std::time::Duration;

use crate::blob::MemoryFile;
use crate::tests::{Event, RecordingHook, load_endpoint_optional, sample_bytes};
use crate::uploader::{UploadHandler, UploadOptions};

#[tokio::test]
async fn upload_to_live_endpoint() {
    let Some(endpoint) = load_endpoint_optional() else {
        return;
    };

    let hook = RecordingHook::new();
    let handler = UploadHandler::builder(UploadOptions::new(endpoint).chunked(64 * 1024))
        .with_hook(hook.clone())
        .build()
        .unwrap();

    let id = handler.add(MemoryFile::new("live-test.bin", sample_bytes(200_000)));
    handler.upload(id).unwrap();

    let finished = tokio::time::timeout(Duration::from_secs(60), async {
        while !hook.has(&Event::Dequeue(id)) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await;

    match finished {
        Ok(()) => {
            let completions = hook.completions_of(id);
            println!("上传结束，响应: {:?}", completions.last());
            assert_eq!(completions.len(), 1);
        }
        Err(_) => eprintln!("联网上传超时（可检查 env 与网络）"),
    }
}
