use std::fmt;

/// Handle to a registered listener. The listener is removed when the handle is dropped, which
/// ties its lifetime to whatever state owns the handle.
#[must_use = "dropping a subscription removes the listener immediately"]
pub struct Subscription(Option<Box<dyn FnOnce()>>);

impl Subscription {
    /// Create a subscription that runs `cancel` once, when dropped.
    pub fn new<F>(cancel: F) -> Self
    where
        F: 'static + FnOnce(),
    {
        Self(Some(Box::new(cancel)))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.0.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscription")
            .field(&self.0.is_some())
            .finish()
    }
}
