pub mod progress_reporter;
pub mod reqwest_transport;
pub mod transport_reply;
pub mod upload_request;

// 重导出公共类型
pub use progress_reporter::ProgressReporter;
pub use reqwest_transport::ReqwestTransport;
pub use transport_reply::TransportReply;
pub use upload_request::{RequestBody, UploadRequest};
