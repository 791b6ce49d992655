use std::cell::{Cell, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::trace;

use crate::render::ChartRegion;

pub type ListenerId = u64;

/// Viewport resize signal a chart registers with while it is rendered.
pub trait ViewportSignal {
    fn add_resize_listener(&self, region: &ChartRegion) -> ListenerId;
    fn remove_resize_listener(&self, id: ListenerId);
}

impl<T: ViewportSignal + ?Sized> ViewportSignal for Rc<T> {
    fn add_resize_listener(&self, region: &ChartRegion) -> ListenerId {
        (**self).add_resize_listener(region)
    }

    fn remove_resize_listener(&self, id: ListenerId) {
        (**self).remove_resize_listener(id);
    }
}

/// Registered resize listener; dropping it unsubscribes.
#[must_use = "dropping the subscription removes the resize listener"]
#[derive(Debug)]
pub struct ResizeSubscription<S: ViewportSignal> {
    signal: S,
    id: ListenerId,
}

impl<S: ViewportSignal> ResizeSubscription<S> {
    pub fn acquire(signal: S, region: &ChartRegion) -> Self {
        let id = signal.add_resize_listener(region);
        trace!(listener = id, region = %region.id, "resize listener added");
        Self { signal, id }
    }

    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl<S: ViewportSignal> Drop for ResizeSubscription<S> {
    fn drop(&mut self) {
        trace!(listener = self.id, "resize listener removed");
        self.signal.remove_resize_listener(self.id);
    }
}

/// In-process listener table for single-threaded hosts.
///
/// The host event loop asks it which regions to notify and forwards the
/// resize to the owning controllers.
#[derive(Debug, Default)]
pub struct ViewportListeners {
    next_id: Cell<ListenerId>,
    listeners: RefCell<IndexMap<ListenerId, ChartRegion>>,
    added: Cell<usize>,
    removed: Cell<usize>,
}

impl ViewportListeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions with a live listener, in registration order.
    #[must_use]
    pub fn regions(&self) -> Vec<ChartRegion> {
        self.listeners.borrow().values().cloned().collect()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    #[must_use]
    pub fn added_total(&self) -> usize {
        self.added.get()
    }

    #[must_use]
    pub fn removed_total(&self) -> usize {
        self.removed.get()
    }
}

impl ViewportSignal for ViewportListeners {
    fn add_resize_listener(&self, region: &ChartRegion) -> ListenerId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.listeners.borrow_mut().insert(id, region.clone());
        self.added.set(self.added.get() + 1);
        id
    }

    fn remove_resize_listener(&self, id: ListenerId) {
        if self.listeners.borrow_mut().shift_remove(&id).is_some() {
            self.removed.set(self.removed.get() + 1);
        }
    }
}
