use tokio::sync::mpsc;

/// Forwards human readable progress lines to whoever renders them (the CLI
/// spinner). A reporter without a sender drops every message.
pub struct ProgressReporter(Option<mpsc::UnboundedSender<String>>);

impl ProgressReporter {
    pub fn new(tx: Option<mpsc::UnboundedSender<String>>) -> Self {
        Self(tx)
    }

    /// Reporter plus the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(Some(tx)), rx)
    }

    pub fn report(&self, message: impl Into<String>) {
        if let Some(tx) = &self.0 {
            let _ = tx.send(message.into());
        }
    }
}
