pub mod file_like;
