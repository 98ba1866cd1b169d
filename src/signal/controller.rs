//! Shared abort controller built on an [`embassy_sync`] blocking mutex.
//!
//! No allocation and no capacity limit: every pending listener carries its own
//! waker node, linked into the controller's waiter list on first poll and
//! unlinked when it resolves or is dropped. A finished operation therefore
//! never leaves a waker behind, and any number of operations can wait on one
//! controller without waking each other.

use core::cell::{RefCell, UnsafeCell};
use core::future::Future;
use core::marker::PhantomPinned;
use core::pin::Pin;
use core::ptr::NonNull;
use core::task::{Context, Poll, Waker};

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

use super::AbortSignal;

/// Abort flag shared between the party that cancels and the operations that
/// observe it.
///
/// Aborting is one-way: once aborted the controller stays aborted.
pub struct AbortController<M: RawMutex> {
    state: Mutex<M, RefCell<ControllerState>>,
}

impl<M: RawMutex> AbortController<M> {
    /// Create a controller in the non-aborted state.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(ControllerState::new())),
        }
    }

    /// Abort and wake every pending listener.
    ///
    /// Returns `true` for the call that performed the transition and `false`
    /// for every later call.
    pub fn abort(&self) -> bool {
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            if state.aborted {
                return false;
            }
            state.aborted = true;

            #[cfg(feature = "defmt")]
            defmt::debug!("Abort signalled, waking {} listener(s)", state.len);

            state.wake_all();
            true
        })
    }

    /// Whether [`abort`](Self::abort) has been called.
    pub fn is_aborted(&self) -> bool {
        self.state.lock(|cell| cell.borrow().aborted)
    }

    /// Number of listeners currently linked into the waiter list.
    pub fn listener_count(&self) -> usize {
        self.state.lock(|cell| cell.borrow().len)
    }

    /// Subscribe to the abort notification.
    pub fn listen(&self) -> AbortListener<'_, M> {
        AbortListener {
            controller: self,
            node: UnsafeCell::new(ListenerNode::new()),
            _pinned: PhantomPinned,
        }
    }
}

impl<M: RawMutex> Default for AbortController<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> AbortSignal for AbortController<M> {
    fn is_aborted(&self) -> bool {
        AbortController::is_aborted(self)
    }

    fn on_abort(&self) -> impl Future<Output = ()> + '_ {
        self.listen()
    }
}

//==================================================================================LISTENER
/// Future resolving once its [`AbortController`] is aborted.
///
/// Linked into the controller on first poll, unlinked on completion or drop.
pub struct AbortListener<'a, M: RawMutex> {
    controller: &'a AbortController<M>,
    node: UnsafeCell<ListenerNode>,
    _pinned: PhantomPinned,
}

// SAFETY: the node is only read or written while the controller mutex is held.
unsafe impl<M: RawMutex + Sync> Send for AbortListener<'_, M> {}

impl<M: RawMutex> Future for AbortListener<'_, M> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let node = self.node.get();
        self.controller.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            if state.aborted {
                // `abort` already unlinked every node.
                return Poll::Ready(());
            }

            // SAFETY: the listener is pinned, so the node address stays valid
            // until `drop` unlinks it; access is serialised by the mutex.
            let node_ref = unsafe { &mut *node };
            match &node_ref.waker {
                Some(waker) if waker.will_wake(cx.waker()) => {}
                _ => node_ref.waker = Some(cx.waker().clone()),
            }
            if !node_ref.linked {
                // SAFETY: `node` comes from a live `UnsafeCell`, never null.
                unsafe { state.push(NonNull::new_unchecked(node)) };
            }
            Poll::Pending
        })
    }
}

impl<M: RawMutex> Drop for AbortListener<'_, M> {
    fn drop(&mut self) {
        let node = self.node.get();
        self.controller.state.lock(|cell| {
            // SAFETY: see `poll`; an unlinked node is left untouched.
            unsafe { cell.borrow_mut().unlink(NonNull::new_unchecked(node)) }
        });
    }
}

//==================================================================================STATE
struct ListenerNode {
    waker: Option<Waker>,
    prev: Option<NonNull<ListenerNode>>,
    next: Option<NonNull<ListenerNode>>,
    linked: bool,
}

impl ListenerNode {
    const fn new() -> Self {
        Self {
            waker: None,
            prev: None,
            next: None,
            linked: false,
        }
    }
}

struct ControllerState {
    aborted: bool,
    head: Option<NonNull<ListenerNode>>,
    len: usize,
}

// SAFETY: the node pointers are only dereferenced under the controller mutex.
unsafe impl Send for ControllerState {}

impl ControllerState {
    const fn new() -> Self {
        Self {
            aborted: false,
            head: None,
            len: 0,
        }
    }

    /// Link `node` at the head of the waiter list.
    ///
    /// # Safety
    /// `node` must point to a pinned, unlinked node that stays valid until it
    /// is unlinked.
    unsafe fn push(&mut self, node: NonNull<ListenerNode>) {
        let entry = &mut *node.as_ptr();
        entry.prev = None;
        entry.next = self.head;
        entry.linked = true;
        if let Some(head) = self.head {
            (*head.as_ptr()).prev = Some(node);
        }
        self.head = Some(node);
        self.len += 1;
    }

    /// Remove `node` from the waiter list and return its waker.
    ///
    /// # Safety
    /// `node` must point to a valid node; if linked, it must belong to this list.
    unsafe fn unlink(&mut self, node: NonNull<ListenerNode>) -> Option<Waker> {
        let entry = &mut *node.as_ptr();
        if !entry.linked {
            return None;
        }
        match entry.prev {
            Some(prev) => (*prev.as_ptr()).next = entry.next,
            None => self.head = entry.next,
        }
        if let Some(next) = entry.next {
            (*next.as_ptr()).prev = entry.prev;
        }
        entry.prev = None;
        entry.next = None;
        entry.linked = false;
        self.len -= 1;
        entry.waker.take()
    }

    fn wake_all(&mut self) {
        while let Some(node) = self.head {
            // SAFETY: every node in the list is valid until it is unlinked.
            if let Some(waker) = unsafe { self.unlink(node) } {
                waker.wake();
            }
        }
    }
}
