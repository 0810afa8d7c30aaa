//! Single-threaded one-shot handoff between an async loader and the frame loop.
//!
//! The loader owns a [`Sender`] holding only a weak reference, so completing a
//! load after the [`Receiver`] was dropped during teardown is a no-op.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug)]
enum Slot<T> {
    Pending,
    Ready(T),
    Failed(String),
    Taken,
}

pub struct Sender<T> {
    slot: Weak<RefCell<Slot<T>>>,
}

pub struct Receiver<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

/// Outcome observed by the frame loop, at most once per handoff.
#[derive(Debug, PartialEq)]
pub enum Poll<T> {
    Pending,
    Ready(T),
    Failed(String),
    Done,
}

pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let slot = Rc::new(RefCell::new(Slot::Pending));
    (
        Sender {
            slot: Rc::downgrade(&slot),
        },
        Receiver { slot },
    )
}

impl<T> Sender<T> {
    /// Returns `false` when the receiver is gone and the value was dropped.
    pub fn complete(self, value: T) -> bool {
        self.store(Slot::Ready(value))
    }

    pub fn fail(self, reason: impl Into<String>) -> bool {
        self.store(Slot::Failed(reason.into()))
    }

    pub fn is_alive(&self) -> bool {
        self.slot.strong_count() > 0
    }

    fn store(self, value: Slot<T>) -> bool {
        match self.slot.upgrade() {
            Some(slot) => {
                *slot.borrow_mut() = value;
                true
            }
            None => false,
        }
    }
}

impl<T> Receiver<T> {
    pub fn poll(&self) -> Poll<T> {
        let mut slot = self.slot.borrow_mut();
        match std::mem::replace(&mut *slot, Slot::Taken) {
            Slot::Pending => {
                *slot = Slot::Pending;
                Poll::Pending
            }
            Slot::Ready(v) => Poll::Ready(v),
            Slot::Failed(reason) => Poll::Failed(reason),
            Slot::Taken => Poll::Done,
        }
    }
}
