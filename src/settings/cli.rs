use super::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "clavier authentication demos")]
pub struct Cli {
    /// Settings file overriding the build-profile default.
    #[arg(long)]
    pub settings: Option<String>,
}
