use clap::Parser;
use monolithos::cli::{run, Cli};
use monolithos::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
