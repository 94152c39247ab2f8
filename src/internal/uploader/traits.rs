pub mod params_source;
pub mod upload_hook;
