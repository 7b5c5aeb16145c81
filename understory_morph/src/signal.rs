// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A shared "content revealed" notification.
//!
//! Collaborators that care whether an in-page reveal has happened (a header that
//! restyles itself once a section is showing, for example) subscribe here instead of
//! repeatedly checking for the revealed content. [`RevealSignal::trigger`] yields a
//! callback to hand to [`RevealMorph`](crate::RevealMorph).
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_morph::RevealSignal;
//!
//! let signal = RevealSignal::new();
//! let header_solid = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&header_solid);
//! signal.subscribe(move || flag.set(true));
//!
//! let mut notify = signal.trigger();
//! notify();
//! assert!(signal.is_revealed());
//! assert!(header_solid.get());
//! ```
//!
//! The signal is single-threaded (`Rc`-based), matching the host's event loop.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

type Subscriber = Box<dyn FnMut()>;

#[derive(Default)]
struct Inner {
    revealed: bool,
    notifications: u64,
    subscribers: Vec<Subscriber>,
}

/// Cloneable handle to a shared reveal notification.
#[derive(Clone, Default)]
pub struct RevealSignal {
    inner: Rc<RefCell<Inner>>,
}

impl core::fmt::Debug for RevealSignal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("RevealSignal")
            .field("revealed", &inner.revealed)
            .field("notifications", &inner.notifications)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl RevealSignal {
    /// A signal that has not fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once [`RevealSignal::notify`] has run and until [`RevealSignal::reset`].
    pub fn is_revealed(&self) -> bool {
        self.inner.borrow().revealed
    }

    /// How many times the signal has fired.
    pub fn notifications(&self) -> u64 {
        self.inner.borrow().notifications
    }

    /// Call `f` every time the signal fires.
    ///
    /// Subscribers may read the signal or subscribe others from inside `f`; those
    /// new subscribers are called from the next notification on.
    pub fn subscribe(&self, f: impl FnMut() + 'static) {
        self.inner.borrow_mut().subscribers.push(Box::new(f));
    }

    /// Mark revealed and call every subscriber in subscription order.
    pub fn notify(&self) {
        let mut running = {
            let mut inner = self.inner.borrow_mut();
            inner.revealed = true;
            inner.notifications += 1;
            core::mem::take(&mut inner.subscribers)
        };
        tracing::debug!(subscribers = running.len(), "reveal signal fired");
        for f in &mut running {
            f();
        }
        let mut inner = self.inner.borrow_mut();
        running.append(&mut inner.subscribers);
        inner.subscribers = running;
    }

    /// Clear the revealed flag, for content that can be hidden again.
    pub fn reset(&self) {
        self.inner.borrow_mut().revealed = false;
    }

    /// A callback that fires this signal.
    pub fn trigger(&self) -> impl FnMut() + 'static {
        let signal = self.clone();
        move || signal.notify()
    }
}
