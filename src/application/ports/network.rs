use tokio::sync::watch;

/// Connectivity observer consumed, not owned, by the offline coordinator.
pub trait NetworkMonitor: Send + Sync {
    fn is_online(&self) -> bool;
    /// Watch channel carrying the current online flag; the coordinator
    /// reacts to Offline→Online edges.
    fn subscribe(&self) -> watch::Receiver<bool>;
}
