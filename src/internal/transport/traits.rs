pub mod upload_transport;
