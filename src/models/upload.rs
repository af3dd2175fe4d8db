use serde::Deserialize;
use url::Url;

#[derive(Debug, PartialEq, Eq)]
pub struct UploadServerHandle {
    pub upload_url: Url,
}

/// Returned by the upload server, flat rather than wrapped in `response`.
#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct UploadedAssetReceipt {
    pub server: i64,
    pub photo: String,
    pub hash: String,
}

/// A photo saved to the community album. Moves into the publish step:
///
/// ```compile_fail
/// use comic_poster::models::SavedAsset;
///
/// let asset = SavedAsset { owner_id: -42, media_id: 77 };
/// let published = asset;
/// asset.attachment();
/// ```
#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct SavedAsset {
    pub owner_id: i64,
    #[serde(rename = "id")]
    pub media_id: i64,
}

impl SavedAsset {
    pub fn attachment(&self) -> String {
        format!("photo{}_{}", self.owner_id, self.media_id)
    }
}

#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
pub struct PublishedPost {
    #[serde(default)]
    pub post_id: Option<i64>,
}
