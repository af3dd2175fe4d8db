use crate::configuration::Settings;
use crate::error::{PosterError, PosterResult};
use crate::models::ComicReference;
use crate::vk_client::{VkClient, WallUploader};
use crate::xkcd_client::{derive_local_path, ComicSource, XkcdClient};
use anyhow::Context;
use log::{debug, error, info};
use reqwest::Client;
use std::fs;
use std::path::PathBuf;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Published {
        comic: ComicReference,
        attachment: String,
        post_id: Option<i64>,
    },
    /// VK refused to hand out an upload server; nothing was downloaded.
    Aborted { message: String },
}

/// Fetches one comic and walks it through the upload chain.
pub struct Poster<C, U> {
    comics: C,
    uploader: U,
    images_dir: PathBuf,
    comic: Option<ComicReference>,
}

impl<C: ComicSource, U: WallUploader> Poster<C, U> {
    pub fn new(comics: C, uploader: U, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            comics,
            uploader,
            images_dir: images_dir.into(),
            comic: None,
        }
    }

    /// Post `comic` instead of picking one at random.
    pub fn with_comic(mut self, comic: Option<ComicReference>) -> Self {
        self.comic = comic;
        self
    }

    pub async fn post(&self) -> PosterResult<RunOutcome> {
        let comic = match self.comic {
            Some(comic) => comic,
            None => self.comics.pick_comic().await?,
        };
        info!("Fetching comic {}", comic);
        let metadata = self.comics.fetch_metadata(comic).await?;
        debug!("Comic {} \"{}\": {}", comic, metadata.title, metadata.image_url);

        let server = match self.uploader.request_upload_server().await {
            Ok(server) => server,
            Err(PosterError::Application { code, message }) => {
                error!("VK refused the upload server ({}): {}", code, message);
                return Ok(RunOutcome::Aborted { message });
            }
            Err(e) => return Err(e),
        };

        let destination = derive_local_path(&metadata.image_url, &self.images_dir)?;
        let image = self
            .comics
            .download(&metadata.image_url, &destination)
            .await?;
        let receipt = self.uploader.upload_binary(server, image).await?;
        let asset = self.uploader.save_asset(receipt).await?;
        let attachment = asset.attachment();
        let post = self.uploader.publish(&metadata.caption, asset).await?;

        Ok(RunOutcome::Published {
            comic,
            attachment,
            post_id: post.post_id,
        })
    }
}

fn http_client() -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Unable to build HTTP client")
}

fn vk_client(settings: &Settings, client: Client) -> VkClient {
    VkClient::new(
        client,
        &settings.vk_api_url,
        &settings.vk_access_token,
        &settings.vk_api_version,
        settings.vk_group_id,
    )
}

pub async fn run(settings: Settings, comic: Option<u32>) -> anyhow::Result<RunOutcome> {
    let images_dir = settings.images_dir();
    info!("Images Directory: {}", images_dir.display());
    fs::create_dir_all(&images_dir)
        .with_context(|| format!("Unable to create {}", images_dir.display()))?;

    let client = http_client()?;
    let poster = Poster::new(
        XkcdClient::new(client.clone(), &settings.xkcd_url),
        vk_client(&settings, client),
        images_dir,
    )
    .with_comic(comic.map(ComicReference));

    let outcome = poster.post().await.context("Posting comic failed")?;
    if let RunOutcome::Published {
        comic,
        attachment,
        post_id,
    } = &outcome
    {
        match post_id {
            Some(id) => info!("Published comic {} as {} in post {}", comic, attachment, id),
            None => info!("Published comic {} as {}", comic, attachment),
        }
    }
    Ok(outcome)
}

pub async fn list_groups(settings: Settings) -> anyhow::Result<Vec<i64>> {
    let vk = vk_client(&settings, http_client()?);
    vk.user_groups().await.context("Listing groups failed")
}
