/// Fire-and-forget user-facing messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
