use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(about = "Post a random xkcd comic to a VK community wall")]
pub struct Cli {
    #[arg(short, long, default_value = "comic-poster")]
    pub config_file: String,

    /// Post this comic instead of a random one
    #[arg(long, value_name = "ID")]
    pub comic: Option<u32>,

    /// Print the communities the access token's user belongs to and exit
    #[arg(long)]
    pub list_groups: bool,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clap_test() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }

    #[test]
    fn parses_fixed_comic() {
        let cli = Cli::try_parse_from(["comic-poster", "--comic", "500"]).unwrap();
        assert_eq!(Some(500), cli.comic);
        assert_eq!("comic-poster", cli.config_file);
        assert!(!cli.list_groups);
    }
}
