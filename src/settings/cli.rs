use super::Parser;

#[derive(Parser, Debug)]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,
    /// Serve logging configuration updates even if the settings don't ask for it
    #[arg(long)]
    pub listen: bool,
}
