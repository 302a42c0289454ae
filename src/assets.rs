//! Asynchronous asset loading for the simulation.
//!
//! Loading happens off the tick thread; each resource is delivered through
//! a one-shot result channel wrapped in an [`AssetSlot`]. The tick loop
//! polls readiness once per tick and simply skips any logic whose inputs
//! have not materialized yet, so a slow loader degrades to "nothing happens
//! for that actor this tick" rather than blocking or failing the loop.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::warn;

/// A resource that may still be in flight.
///
/// Poll it once per tick; once the value has arrived the slot keeps it and
/// every later poll is a cheap borrow. A loader that dies without
/// delivering leaves the slot permanently empty, which the simulation
/// already tolerates as the not-yet-loaded state.
#[derive(Debug)]
pub struct AssetSlot<T> {
    receiver: Option<Receiver<T>>,
    value: Option<T>,
}

impl<T> AssetSlot<T> {
    /// A slot whose value is still being produced.
    pub fn loading(receiver: Receiver<T>) -> Self {
        Self {
            receiver: Some(receiver),
            value: None,
        }
    }

    /// A slot that already holds its value. Useful for hosts that load
    /// synchronously and for tests.
    pub fn ready(value: T) -> Self {
        Self {
            receiver: None,
            value: Some(value),
        }
    }

    /// Checks for a delivered value without blocking, then returns the
    /// value if the slot holds one.
    pub fn poll(&mut self) -> Option<&T> {
        if self.value.is_none() {
            if let Some(receiver) = &self.receiver {
                match receiver.try_recv() {
                    Ok(value) => {
                        self.value = Some(value);
                        self.receiver = None;
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        warn!("asset loader dropped without delivering");
                        self.receiver = None;
                    }
                }
            }
        }
        self.value.as_ref()
    }

    /// Returns the value if it has already been observed by `poll`.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.value.is_some()
    }

    /// Consumes the slot, yielding the value if it has arrived.
    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

/// Runs `loader` on a background thread and returns the slot its result
/// will arrive in.
pub fn load_async<T, F>(loader: F) -> AssetSlot<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        // A receiver dropped before delivery just means nobody wants the
        // asset anymore.
        let _ = sender.send(loader());
    });
    AssetSlot::loading(receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn ready_slot_is_immediately_available() {
        let mut slot = AssetSlot::ready(7_u32);
        assert!(slot.is_ready());
        assert_eq!(slot.poll(), Some(&7));
    }

    #[test]
    fn async_load_arrives_after_polling() {
        let mut slot = load_async(|| {
            thread::sleep(Duration::from_millis(10));
            "maze"
        });

        // Poll until the loader thread delivers.
        let mut delivered = false;
        for _ in 0..200 {
            if slot.poll().is_some() {
                delivered = true;
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert!(delivered);
        assert_eq!(slot.get(), Some(&"maze"));
    }

    #[test]
    fn dead_loader_leaves_slot_empty() {
        let (sender, receiver) = mpsc::channel::<u32>();
        drop(sender);

        let mut slot = AssetSlot::loading(receiver);
        assert!(slot.poll().is_none());
        assert!(slot.poll().is_none(), "stays empty on later polls");
    }
}
