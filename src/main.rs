use anyhow::Result;
use std::sync::Arc;
use wa_keeper::bot::Bot;
use wa_keeper::client::memory::MemoryConnector;
use wa_keeper::utils::logger;

// Entry point. The in-memory connector stands in for a transport-backed
// protocol client; swap it for one wired to a live transport to go online.
#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    let connector = Arc::new(MemoryConnector::new());
    let bot = Bot::builder().with_connector(connector).build()?;
    bot.run().await
}
