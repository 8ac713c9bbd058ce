use std::sync::Arc;

use clap::Parser;
use relayq::{logging, Config, QueueRegistry, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init(config.log_format);

    let registry = Arc::new(QueueRegistry::new());

    let server = Server::new(config, registry.clone());
    server.run().await?;

    let summary = registry.stats_summary();
    tracing::info!(
        queues = summary.total_queues,
        "relayq stopped; {} messages left undelivered",
        summary.queues.values().map(|q| q.size).sum::<usize>()
    );

    Ok(())
}
