pub mod client;
pub mod duration;
pub mod error;
#[cfg(test)]
pub(crate) mod mock_server;

pub use client::{UploadMetadata, UploadedVideo, YoutubeClient};
pub use error::{YoutubeError, classify_upload_error};
