use std::time::Duration;

use tracing::info;

use finsdk_core::FinContext;
use finsdk_memory::{DEFAULT_COMPRESS_HORIZON_MS, MemoryItem};
use finsdk_model::WorkerConfig;
use finsdk_observe::{LoggerConfig, LoggerLevel, init_logger};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) logger
    let cfg = LoggerConfig {
        level: LoggerLevel::new("info")?,
        ..Default::default()
    };
    init_logger(&cfg)?;
    info!("logger initialized");

    // 2) context
    let ctx = FinContext::new().with_worker_config(WorkerConfig::default().with_tick_ms(1_000));

    // 3) configuration
    let merged = ctx.load_config(Some("fetch_url:http://127.0.0.1:8080/ping\ntick_ms:1000"));
    info!(merged, "configuration loaded");

    // 4) transforms
    info!("{}", ctx.process_memory(Some("quarterly report draft")));
    info!("{}", ctx.encrypt(Some("quarterly report draft")));
    info!("{}", ctx.decrypt(Some("quarterly report draft")));
    info!("{}", ctx.process_memory(None));

    // 5) memory store
    {
        let mut memory = ctx.memory();
        memory.insert(MemoryItem::new("the sky is blue").with_factual(0.9));
        memory.insert(MemoryItem::new("cats can fly").with_factual(0.1));
        let hits = memory.retrieve("sky");
        info!(hits = hits.len(), "retrieval for 'sky'");
        let report = memory.compress(DEFAULT_COMPRESS_HORIZON_MS);
        info!(
            total = report.total,
            removed = report.removed,
            "compression pass"
        );
    }

    // 6) background worker
    ctx.start();
    tokio::time::sleep(Duration::from_secs(5)).await;
    ctx.stop_wait(Duration::from_secs(2)).await?;
    info!("worker stopped");

    // 7) dump the config snapshot through the file store
    let dump = std::env::temp_dir().join("finsdk-hostapp-config.txt");
    for (key, value) in ctx.config_snapshot().iter() {
        ctx.files().append(&dump, &format!("{key}:{value}")).await?;
    }
    info!(path = %dump.display(), "config snapshot written");

    Ok(())
}
