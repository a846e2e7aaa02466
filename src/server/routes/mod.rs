pub mod download;
pub mod infra;
pub mod landing;
pub mod releases;
