/// Port for user-facing alerts.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}
