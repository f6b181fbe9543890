pub mod multipart;
pub mod upload;
