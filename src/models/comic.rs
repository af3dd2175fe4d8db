use serde::Deserialize;
use std::fmt;
use url::Url;

/// Index of one published comic, counted from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComicReference(pub u32);

impl fmt::Display for ComicReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicMetadata {
    pub number: u32,
    pub title: String,
    pub image_url: Url,
    pub caption: String,
}

/// Body of `info.0.json`, both the latest and the per-comic variant.
#[derive(Deserialize, Debug)]
pub(crate) struct ComicInfo {
    pub num: u32,
    pub img: String,
    pub alt: String,
    #[serde(default)]
    pub safe_title: String,
}
