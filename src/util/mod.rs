mod handler_slot;
mod subscription;

pub use handler_slot::HandlerSlot;
pub use subscription::Subscription;
