use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use bento::{Component, ComponentDataObserver, DataEvent};

/// Buffers the flat-space events reported by a root component.
///
/// List hosts usually apply structural updates once per frame; attach a recorder to the root
/// and drain it with [`ChangeRecorder::take`] when the host is ready.
#[derive(Debug, Default)]
pub struct ChangeRecorder {
    events: RefCell<Vec<DataEvent>>,
}

impl ChangeRecorder {
    /// Creates a recorder and registers it on `root`.
    pub fn attach(root: &dyn Component) -> Rc<Self> {
        let recorder = Rc::new(Self::default());
        root.data_observable().register_observer(recorder.clone());
        recorder
    }

    /// Unregisters this recorder from `root`. Returns `false` if it was not registered.
    pub fn detach(self: &Rc<Self>, root: &dyn Component) -> bool {
        let observer: Rc<dyn ComponentDataObserver> = self.clone();
        root.data_observable().unregister_observer(&observer)
    }

    /// Drains the buffered events, oldest first.
    pub fn take(&self) -> Vec<DataEvent> {
        core::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ComponentDataObserver for ChangeRecorder {
    fn on_event(&self, event: DataEvent) {
        self.events.borrow_mut().push(event);
    }
}
