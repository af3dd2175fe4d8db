use crate::error::{PosterError, PosterResult};
use crate::models::{PublishedPost, SavedAsset, UploadServerHandle, UploadedAssetReceipt};
use crate::transient_image::TransientImage;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{multipart, Client, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

/// The four calls that put a photo on a community wall. Each step consumes
/// what the previous one produced.
#[async_trait]
pub trait WallUploader: Send + Sync {
    async fn request_upload_server(&self) -> PosterResult<UploadServerHandle>;

    /// Uploads the image and deletes it, whatever the outcome.
    async fn upload_binary(
        &self,
        server: UploadServerHandle,
        image: TransientImage,
    ) -> PosterResult<UploadedAssetReceipt>;

    async fn save_asset(&self, receipt: UploadedAssetReceipt) -> PosterResult<SavedAsset>;

    async fn publish(&self, caption: &str, asset: SavedAsset) -> PosterResult<PublishedPost>;
}

/// `{"response": ...}` on success, `{"error": {...}}` otherwise, both with 200.
#[derive(Deserialize, Debug)]
struct VkEnvelope<T> {
    response: Option<T>,
    error: Option<VkApiError>,
}

#[derive(Deserialize, Debug)]
struct VkApiError {
    #[serde(default)]
    error_code: i64,
    error_msg: String,
}

#[derive(Deserialize, Debug)]
struct UploadServerResponse {
    upload_url: String,
}

#[derive(Deserialize, Debug)]
struct GroupsResponse {
    #[serde(default)]
    items: Vec<i64>,
}

pub struct VkClient {
    client: Client,
    api_url: String,
    access_token: String,
    api_version: String,
    group_id: u64,
}

impl VkClient {
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        access_token: impl Into<String>,
        api_version: impl Into<String>,
        group_id: u64,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            access_token: access_token.into(),
            api_version: api_version.into(),
            group_id,
        }
    }

    /// Communities the token's user is a member of.
    pub async fn user_groups(&self) -> PosterResult<Vec<i64>> {
        let groups: GroupsResponse = self.call(Method::GET, "groups.get", &[]).await?;
        Ok(groups.items)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        name: &str,
        params: &[(&str, String)],
    ) -> PosterResult<T> {
        let url = format!("{}/{}", self.api_url, name);
        debug!("{} {}", method, url);
        let request = self
            .client
            .request(method.clone(), &url)
            .query(&self.auth_params());
        let request = if method == Method::GET {
            request.query(params)
        } else {
            request.form(params)
        };
        let body = request.send().await?.error_for_status()?.text().await?;
        parse_method_response(name, &body)
    }

    fn auth_params(&self) -> [(&str, &str); 2] {
        [
            ("access_token", self.access_token.as_str()),
            ("v", self.api_version.as_str()),
        ]
    }
}

#[async_trait]
impl WallUploader for VkClient {
    async fn request_upload_server(&self) -> PosterResult<UploadServerHandle> {
        let server: UploadServerResponse = self
            .call(
                Method::GET,
                "photos.getWallUploadServer",
                &[("group_id", self.group_id.to_string())],
            )
            .await?;
        let upload_url = Url::parse(&server.upload_url).map_err(|e| {
            PosterError::malformed(format!("upload url {:?}: {}", server.upload_url, e))
        })?;
        Ok(UploadServerHandle { upload_url })
    }

    async fn upload_binary(
        &self,
        server: UploadServerHandle,
        image: TransientImage,
    ) -> PosterResult<UploadedAssetReceipt> {
        info!("Uploading {}", image.path().display());
        let bytes = image.read().await?;
        let part = multipart::Part::bytes(bytes).file_name(image.file_name());
        let form = multipart::Form::new().part("photo", part);

        let body = self
            .client
            .post(server.upload_url)
            .query(&self.auth_params())
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_upload_receipt(&body)
    }

    async fn save_asset(&self, receipt: UploadedAssetReceipt) -> PosterResult<SavedAsset> {
        let saved: Vec<SavedAsset> = self
            .call(
                Method::POST,
                "photos.saveWallPhoto",
                &[
                    ("hash", receipt.hash),
                    ("server", receipt.server.to_string()),
                    ("photo", receipt.photo),
                    ("group_id", self.group_id.to_string()),
                ],
            )
            .await?;
        first_saved(saved)
    }

    async fn publish(&self, caption: &str, asset: SavedAsset) -> PosterResult<PublishedPost> {
        let attachment = asset.attachment();
        info!("Publishing {} to group {}", attachment, self.group_id);
        self.call(
            Method::POST,
            "wall.post",
            &[
                ("owner_id", format!("-{}", self.group_id)),
                ("from_group", "1".into()),
                ("message", caption.to_owned()),
                ("attachments", attachment),
            ],
        )
        .await
    }
}

fn parse_method_response<T: DeserializeOwned>(name: &str, body: &str) -> PosterResult<T> {
    let envelope: VkEnvelope<T> = serde_json::from_str(body)
        .map_err(|e| PosterError::malformed(format!("{name}: {e}")))?;
    if let Some(error) = envelope.error {
        return Err(PosterError::Application {
            code: error.error_code,
            message: error.error_msg,
        });
    }
    envelope
        .response
        .ok_or_else(|| PosterError::malformed(format!("{name}: no response field")))
}

fn parse_upload_receipt(body: &str) -> PosterResult<UploadedAssetReceipt> {
    let receipt: UploadedAssetReceipt = serde_json::from_str(body)
        .map_err(|e| PosterError::malformed(format!("upload receipt: {e}")))?;
    // An upload the server did not accept comes back with an empty photo list.
    if receipt.photo.is_empty() || receipt.photo == "[]" {
        return Err(PosterError::malformed("upload receipt carries no photo"));
    }
    Ok(receipt)
}

fn first_saved(saved: Vec<SavedAsset>) -> PosterResult<SavedAsset> {
    saved
        .into_iter()
        .next()
        .ok_or_else(|| PosterError::malformed("photos.saveWallPhoto returned no photos"))
}
