pub mod cli;
pub mod comic;
pub mod upload;

pub use cli::Cli;
pub use comic::{ComicMetadata, ComicReference};
pub use upload::{PublishedPost, SavedAsset, UploadServerHandle, UploadedAssetReceipt};
