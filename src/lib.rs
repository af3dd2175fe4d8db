pub mod configuration;
pub mod error;
pub mod models;
pub mod run;
pub mod startup;
pub mod transient_image;
pub mod vk_client;
pub mod xkcd_client;

pub use configuration::Settings;
pub use error::{PosterError, PosterResult};
pub use models::Cli;
pub use run::{run, Poster, RunOutcome};
