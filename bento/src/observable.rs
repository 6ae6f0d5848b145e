use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::{ComponentRef, DataEvent};

/// Receives structural changes from a component, in that component's coordinates.
pub trait ComponentDataObserver {
    fn on_event(&self, event: DataEvent);
}

impl<F: Fn(DataEvent)> ComponentDataObserver for F {
    fn on_event(&self, event: DataEvent) {
        self(event)
    }
}

/// Receives group-level notifications from a [`crate::ComponentGroup`].
pub trait ComponentGroupObserver {
    /// Called after a change to the group's children has been fully propagated.
    fn on_changed(&self);

    /// Called whenever a child is detached from the group (removed, replaced or cleared).
    fn on_component_removed(&self, component: &ComponentRef);
}

/// An ordered list of observers.
///
/// Notifications walk a snapshot of the list from the most recently registered observer to
/// the first, with the list released during every callback. An observer may unregister
/// itself or any other observer from inside its callback: every observer still registered
/// when its turn comes is called exactly once, and one removed before its turn is not
/// called. Observers registered during a notification are not called by it.
pub struct Observable<O: ?Sized> {
    observers: RefCell<Vec<Rc<O>>>,
}

impl<O: ?Sized> Default for Observable<O> {
    fn default() -> Self {
        Self {
            observers: RefCell::new(Vec::new()),
        }
    }
}

impl<O: ?Sized> fmt::Debug for Observable<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.len())
            .finish()
    }
}

impl<O: ?Sized> Observable<O> {
    pub fn register(&self, observer: Rc<O>) {
        self.observers.borrow_mut().push(observer);
    }

    /// Removes the last registration of `observer`. Returns `false` if it was not registered.
    pub fn unregister(&self, observer: &Rc<O>) -> bool {
        let mut observers = self.observers.borrow_mut();
        match observers.iter().rposition(|o| same_rc(o, observer)) {
            Some(i) => {
                observers.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, observer: &Rc<O>) -> bool {
        self.observers.borrow().iter().any(|o| same_rc(o, observer))
    }

    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn for_each_reverse(&self, mut f: impl FnMut(&O)) {
        let snapshot: Vec<Rc<O>> = self.observers.borrow().iter().rev().cloned().collect();
        for observer in &snapshot {
            // Unregistered by an earlier callback.
            if !self.is_registered(observer) {
                continue;
            }
            f(&**observer);
        }
    }
}

/// The registration point through which a component reports structural changes.
///
/// Besides the observer list, it records which group (if any) currently owns the
/// component. A component instance can be attached to at most one group at a time.
#[derive(Default)]
pub struct DataObservable {
    observers: Observable<dyn ComponentDataObserver>,
    owner: RefCell<Option<Weak<dyn crate::Component>>>,
}

impl fmt::Debug for DataObservable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataObservable")
            .field("observers", &self.observers.len())
            .field("owned", &self.is_owned())
            .finish()
    }
}

impl DataObservable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_observer(&self, observer: Rc<dyn ComponentDataObserver>) {
        self.observers.register(observer);
    }

    pub fn unregister_observer(&self, observer: &Rc<dyn ComponentDataObserver>) -> bool {
        self.observers.unregister(observer)
    }

    pub fn is_registered(&self, observer: &Rc<dyn ComponentDataObserver>) -> bool {
        self.observers.is_registered(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Delivers `event` to every observer, last registered first.
    pub fn notify(&self, event: DataEvent) {
        self.observers.for_each_reverse(|o| o.on_event(event));
    }

    pub fn notify_changed(&self) {
        self.notify(DataEvent::Changed);
    }

    pub fn notify_range_changed(&self, start: usize, count: usize) {
        self.notify(DataEvent::RangeChanged { start, count });
    }

    pub fn notify_range_inserted(&self, start: usize, count: usize) {
        self.notify(DataEvent::RangeInserted { start, count });
    }

    pub fn notify_range_removed(&self, start: usize, count: usize) {
        self.notify(DataEvent::RangeRemoved { start, count });
    }

    pub fn notify_moved(&self, from: usize, to: usize) {
        self.notify(DataEvent::Moved { from, to });
    }

    /// The group this component is attached to, if it is still alive.
    pub fn owner(&self) -> Option<ComponentRef> {
        self.owner.borrow().as_ref().and_then(Weak::upgrade)
    }

    pub fn is_owned(&self) -> bool {
        self.owner().is_some()
    }

    pub(crate) fn set_owner(&self, owner: Weak<dyn crate::Component>) {
        *self.owner.borrow_mut() = Some(owner);
    }

    pub(crate) fn clear_owner(&self) {
        self.owner.borrow_mut().take();
    }
}

/// Listeners for group-level notifications.
#[derive(Debug, Default)]
pub struct GroupObservable {
    observers: Observable<dyn ComponentGroupObserver>,
}

impl GroupObservable {
    pub fn register(&self, observer: Rc<dyn ComponentGroupObserver>) {
        self.observers.register(observer);
    }

    pub fn unregister(&self, observer: &Rc<dyn ComponentGroupObserver>) -> bool {
        self.observers.unregister(observer)
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify_changed(&self) {
        self.observers.for_each_reverse(|o| o.on_changed());
    }

    pub fn notify_component_removed(&self, component: &ComponentRef) {
        self.observers
            .for_each_reverse(|o| o.on_component_removed(component));
    }
}

fn same_rc<O: ?Sized>(a: &Rc<O>, b: &Rc<O>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}
