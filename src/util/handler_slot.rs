use std::{cell::RefCell, fmt, rc::Rc};

type Handler<T> = Rc<dyn Fn(T)>;

/// A shared, replaceable slot for a single event handler. Views register their DOM listeners
/// once and route them through a slot, so the handler can be bound after construction.
///
/// Cloning the slot clones the reference, not the handler.
pub struct HandlerSlot<T>(Rc<RefCell<Option<Handler<T>>>>);

impl<T> HandlerSlot<T> {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Bind a handler, replacing any previous one.
    pub fn set<F>(&self, handler: F)
    where
        F: 'static + Fn(T),
    {
        *self.0.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn is_set(&self) -> bool {
        self.0.borrow().is_some()
    }

    /// Call the bound handler, if any. Returns whether a handler ran.
    ///
    /// The handler is cloned out of the slot before being called, so it may freely rebind the
    /// slot or drop the view that owns it.
    pub fn emit(&self, value: T) -> bool {
        let handler = self.0.borrow().clone();

        match handler {
            Some(handler) => {
                handler(value);
                true
            }
            None => false,
        }
    }
}

impl<T> Clone for HandlerSlot<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for HandlerSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HandlerSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerSlot").field(&self.is_set()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn emit_without_handler() {
        let slot = HandlerSlot::<u32>::new();
        assert!(!slot.emit(1));
    }

    #[test]
    fn handler_can_rebind_its_own_slot() {
        let slot = HandlerSlot::<u32>::new();
        let seen = Rc::new(Cell::new(0));

        slot.set({
            let slot = slot.clone();
            let seen = Rc::clone(&seen);
            move |value| {
                seen.set(value);

                let seen = Rc::clone(&seen);
                slot.set(move |value| seen.set(value * 10));
            }
        });

        assert!(slot.emit(2));
        assert_eq!(seen.get(), 2);

        assert!(slot.emit(3));
        assert_eq!(seen.get(), 30);
    }
}
