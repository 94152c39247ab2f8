pub mod blob;
pub mod transport;
pub mod uploader;
