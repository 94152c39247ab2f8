//! 惰性字节区间视图：创建时不读取数据，发送时才通过 [`BlobSlice::stream`] 逐段读出。

use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::{self, BoxStream};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::internal::uploader::structs::upload_error::UploadError;

/// 视图内容的分段流。
pub type BlobStream = BoxStream<'static, io::Result<Bytes>>;

/// 文件某个半开区间 `[start, end)` 的只读视图。
#[derive(Debug, Clone)]
pub enum BlobSlice {
    /// 内存数据的零拷贝切片
    Shared(Bytes),
    /// 本地文件的区间，读取推迟到发送时
    FileRange {
        path: PathBuf,
        start: u64,
        len: u64,
    },
}

impl BlobSlice {
    /// 视图覆盖的字节数。
    pub fn len(&self) -> u64 {
        match self {
            BlobSlice::Shared(bytes) => bytes.len() as u64,
            BlobSlice::FileRange { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按至多 `piece_size` 字节一段读出视图内容。
    ///
    /// 内存切片按段零拷贝切分；文件区间先 seek 到起点，再用 `take(len)` 限长边读边交出，
    /// 任何时刻只有一段数据在内存里。
    pub async fn stream(&self, piece_size: usize) -> Result<BlobStream, UploadError> {
        let piece_size = piece_size.max(1);
        match self {
            BlobSlice::Shared(bytes) => {
                let bytes = bytes.clone();
                let total = bytes.len();
                let pieces = (0..total).step_by(piece_size).map(move |start| {
                    Ok(bytes.slice(start..(start + piece_size).min(total)))
                });
                Ok(stream::iter(pieces).boxed())
            }
            BlobSlice::FileRange { path, start, len } => {
                if *len == 0 {
                    return Ok(stream::empty().boxed());
                }
                let mut file = File::open(path).await.map_err(UploadError::ReadBlob)?;
                file.seek(io::SeekFrom::Start(*start))
                    .await
                    .map_err(UploadError::ReadBlob)?;
                let limited = file.take(*len);
                Ok(ReaderStream::with_capacity(limited, piece_size).boxed())
            }
        }
    }

    /// 一次读出全部内容，仅供测试核对数据。
    #[cfg(test)]
    pub(crate) async fn load(&self) -> Result<Bytes, UploadError> {
        let mut pieces = self.stream(64 * 1024).await?;
        let mut buf = bytes::BytesMut::new();
        while let Some(piece) = pieces.next().await {
            buf.extend_from_slice(&piece.map_err(UploadError::ReadBlob)?);
        }
        Ok(buf.freeze())
    }
}
