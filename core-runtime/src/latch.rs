//! One-shot readiness latch.
//!
//! A [`Latch`] is a boolean flag plus a queue of waiters. Opening it drains
//! the queue exactly once, in registration order. Waiters registered after
//! the latch is open run immediately.
//!
//! There is no way to withdraw a waiter: once queued it runs when the latch
//! opens, even if whoever queued it no longer cares. Waiters that capture
//! strong references keep those objects alive until then.

use crate::error::{Error, Result};
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;

type Waiter = Box<dyn FnOnce()>;

/// Named one-shot gate. See the module docs for the semantics.
pub struct Latch {
    name: &'static str,
    open: Cell<bool>,
    waiters: RefCell<Vec<Waiter>>,
}

impl Latch {
    /// Create a closed latch. `name` only appears in logs and errors.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            open: Cell::new(false),
            waiters: RefCell::new(Vec::new()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Number of waiters queued and not yet run.
    pub fn pending(&self) -> usize {
        self.waiters.borrow().len()
    }

    /// Run `waiter` once the latch is open (immediately if it already is).
    pub fn when_open(&self, waiter: impl FnOnce() + 'static) {
        if self.is_open() {
            waiter();
            return;
        }
        self.waiters.borrow_mut().push(Box::new(waiter));
        tracing::trace!(latch = self.name, pending = self.pending(), "Waiter queued");
    }

    /// Open the latch and drain the queue. Returns the number of waiters run.
    ///
    /// Opening an already open latch does nothing. Waiters may queue new
    /// waiters while the queue drains; those run immediately because the
    /// flag is set first.
    pub fn open(&self) -> usize {
        if self.open.replace(true) {
            return 0;
        }

        let waiters = std::mem::take(&mut *self.waiters.borrow_mut());
        let count = waiters.len();
        tracing::debug!(latch = self.name, waiters = count, "Latch opened");

        for waiter in waiters {
            waiter();
        }
        count
    }

    /// Future resolving once the latch is open.
    ///
    /// Resolves to [`Error::LatchReset`] if the latch is reset first, since
    /// the queued waiter is then dropped without running.
    pub fn wait(&self) -> impl Future<Output = Result<()>> + 'static {
        let name = self.name;
        let (tx, rx) = oneshot::channel::<()>();
        self.when_open(move || {
            let _ = tx.send(());
        });
        async move { rx.await.map_err(|_| Error::LatchReset(name)) }
    }

    /// Drop queued waiters without running them and close the latch.
    pub(crate) fn reset(&self) {
        self.waiters.borrow_mut().clear();
        self.open.set(false);
    }
}

impl fmt::Debug for Latch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Latch")
            .field("name", &self.name)
            .field("open", &self.is_open())
            .field("pending", &self.pending())
            .finish()
    }
}
