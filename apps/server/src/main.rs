use anyhow::Context;
use ihub::kernel::config::load_config;
use ihub_logger::Logger;
use ihub_server::Server;

#[ihub_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg = load_config(Some("server")).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build().await?.run().await
}
