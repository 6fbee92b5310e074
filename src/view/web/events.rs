use js_sys::Function;
use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::Event;

use crate::util::HandlerSlot;

/// Create a JS listener that forwards every event to `callback`. Ownership of the closure is
/// handed to the JS garbage collector, so it lives for as long as the node it is bound to.
pub fn listener<F>(callback: F) -> Function
where
    F: 'static + Fn(Event),
{
    Closure::<dyn Fn(Event)>::new(callback)
        .into_js_value()
        .unchecked_into()
}

/// Listener that suppresses the default action, and emits `value` into `slot`.
pub fn emit_into<T>(slot: &HandlerSlot<T>, value: T) -> Function
where
    T: 'static + Clone,
{
    let slot = slot.clone();
    listener(move |event| {
        event.prevent_default();
        slot.emit(value.clone());
    })
}
