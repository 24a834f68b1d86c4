//! Run command implementation

use clap::Args;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

use crate::config::Config;
use crate::feed::BinanceRestFeed;
use crate::rotator::{Command, Rotator};
use crate::sink::TracingSink;
use crate::store::CsvStore;

#[derive(Args, Debug)]
pub struct RunArgs {}

impl RunArgs {
    /// Build the loop and run it until Ctrl-C
    ///
    /// On Unix, SIGUSR1 queues a manual park-to-USDT.
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let feed = BinanceRestFeed::new(Duration::from_secs(config.feed.request_timeout_secs))?;
        let store = CsvStore::open(&config.store.dir)?;
        let rotator = Rotator::new(config, feed, store, Box::new(TracingSink))?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Ctrl-C received");
                let _ = shutdown_tx.send(true);
            }
        });

        #[cfg(unix)]
        {
            let park_tx = command_tx.clone();
            tokio::spawn(async move {
                use tokio::signal::unix::{signal, SignalKind};
                let Ok(mut usr1) = signal(SignalKind::user_defined1()) else {
                    return;
                };
                while usr1.recv().await.is_some() {
                    tracing::info!("SIGUSR1 received, queueing park to USDT");
                    if park_tx.send(Command::ParkToUsdt).await.is_err() {
                        break;
                    }
                }
            });
        }

        rotator.run(command_rx, shutdown_rx).await
    }
}
