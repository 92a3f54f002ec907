use crate::application::ports::NetworkMonitor;
use tokio::sync::watch;
use tracing::info;

/// Connectivity source backed by a `watch` channel. The host app (or a
/// test) reports state changes through `set_online`; subscribers see
/// every Offline/Online edge.
pub struct WatchNetworkMonitor {
    tx: watch::Sender<bool>,
}

impl WatchNetworkMonitor {
    pub fn new(online: bool) -> Self {
        let (tx, _) = watch::channel(online);
        Self { tx }
    }

    pub fn set_online(&self, online: bool) {
        if *self.tx.borrow() != online {
            info!(online, "Connectivity changed");
        }
        // send_replace never fails, even with no subscribers.
        self.tx.send_replace(online);
    }
}

impl Default for WatchNetworkMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NetworkMonitor for WatchNetworkMonitor {
    fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
