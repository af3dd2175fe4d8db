use crate::error::{PosterError, PosterResult};
use crate::models::comic::ComicInfo;
use crate::models::{ComicMetadata, ComicReference};
use crate::transient_image::TransientImage;
use async_trait::async_trait;
use log::{debug, info};
use rand::Rng;
use reqwest::Client;
use std::path::{Path, PathBuf};
use url::Url;

/// Where comics come from.
#[async_trait]
pub trait ComicSource: Send + Sync {
    /// Picks a comic uniformly from everything published so far.
    async fn pick_comic(&self) -> PosterResult<ComicReference>;

    async fn fetch_metadata(&self, comic: ComicReference) -> PosterResult<ComicMetadata>;

    /// Downloads `url` to `destination`, overwriting it. The returned guard
    /// owns the file.
    async fn download(&self, url: &Url, destination: &Path) -> PosterResult<TransientImage>;
}

pub struct XkcdClient {
    client: Client,
    base_url: String,
}

impl XkcdClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    async fn get_info(&self, url: &str) -> PosterResult<ComicInfo> {
        debug!("GET {}", url);
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        serde_json::from_str(&body)
            .map_err(|e| PosterError::malformed(format!("comic metadata from {url}: {e}")))
    }
}

#[async_trait]
impl ComicSource for XkcdClient {
    async fn pick_comic(&self) -> PosterResult<ComicReference> {
        let latest = self
            .get_info(&format!("{}/info.0.json", self.base_url))
            .await?;
        if latest.num == 0 {
            return Err(PosterError::malformed("latest comic number is 0"));
        }
        let picked = rand::thread_rng().gen_range(1..=latest.num);
        debug!("Picked comic {} of {}", picked, latest.num);
        Ok(ComicReference(picked))
    }

    async fn fetch_metadata(&self, comic: ComicReference) -> PosterResult<ComicMetadata> {
        let info = self
            .get_info(&format!("{}/{}/info.0.json", self.base_url, comic.0))
            .await?;
        metadata_from_info(info)
    }

    async fn download(&self, url: &Url, destination: &Path) -> PosterResult<TransientImage> {
        info!("Downloading {} to {}", url, destination.display());
        // Claimed before the request so a partial write is cleaned up too.
        let image = TransientImage::claim(destination);
        let bytes = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        image.write(&bytes).await?;
        debug!("Wrote {} bytes", bytes.len());
        Ok(image)
    }
}

fn metadata_from_info(info: ComicInfo) -> PosterResult<ComicMetadata> {
    if info.img.trim().is_empty() {
        return Err(PosterError::malformed(format!(
            "comic {} has no image",
            info.num
        )));
    }
    let image_url = Url::parse(&info.img)
        .map_err(|e| PosterError::malformed(format!("image url {:?}: {}", info.img, e)))?;
    Ok(ComicMetadata {
        number: info.num,
        title: info.safe_title,
        image_url,
        caption: info.alt,
    })
}

/// `folder` joined with the file name of the url's last path segment. Query
/// and fragment never take part.
pub fn derive_local_path(url: &Url, folder: &Path) -> PosterResult<PathBuf> {
    let file_name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| PosterError::malformed(format!("no file name in {url}")))?;
    Ok(folder.join(file_name))
}
