mod cli;
mod repl;
mod terminal;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use rag_client::{ApiClient, Controller, TerminalMarkdown};
use terminal::TerminalView;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let client = ApiClient::new(&args.base_url)?;
    let config = args.client_config(client.origin());
    log::info!("Connecting to {}", client.base_url());

    let styled = !args.no_color;
    let renderer = TerminalMarkdown::new(styled)?;
    let mut controller = Controller::new(client, TerminalView::stdio(styled), config)
        .with_renderer(Box::new(renderer));

    if !args.skip_health_check {
        controller.health_check().await;
    }
    controller.initialize().await;

    repl::run(&mut controller).await
}
