use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::accordion::AccordionList;
use crate::identity::IdentityPositionMap;
use crate::{
    Component, ComponentDataObserver, ComponentGroupObserver, ComponentId, ComponentRef,
    DataEvent, DataObservable, Error, GroupObservable, GroupOptions, HolderType, Item, Presenter,
    Range, Result,
};

/// A component made of zero or more ordered child components.
///
/// Each child owns a contiguous range of the group's positions, in child order. Children
/// report changes through their [`DataObservable`]; the group keeps its ranges in sync and
/// re-emits every change in its own coordinates, so nesting groups yields a single flat
/// list at the root.
///
/// Groups are always shared: [`ComponentGroup::new`] returns an `Rc`. All operations take
/// `&self` and complete synchronously, including the notifications they trigger. Mutating
/// a group from inside one of its own callbacks is not supported and may panic.
pub struct ComponentGroup {
    this: Weak<ComponentGroup>,
    options: RefCell<GroupOptions>,
    state: RefCell<GroupState>,
    data: DataObservable,
    observers: GroupObservable,
}

#[derive(Default)]
struct GroupState {
    children: AccordionList<Child>,
    slots: IdentityPositionMap,
}

#[derive(Clone)]
struct Child {
    component: ComponentRef,
    translator: Rc<dyn ComponentDataObserver>,
}

impl Child {
    fn id(&self) -> ComponentId {
        ComponentId::of(&self.component)
    }
}

/// Forwards one child's events to its group. One instance exists per attached child.
struct ChildObserver {
    group: Weak<ComponentGroup>,
    child: Weak<dyn Component>,
    id: ComponentId,
}

impl ComponentDataObserver for ChildObserver {
    fn on_event(&self, event: DataEvent) {
        if let Some(group) = self.group.upgrade() {
            group.on_child_event(self.id, &self.child, event);
        }
    }
}

impl ComponentGroup {
    pub fn new() -> Rc<Self> {
        Self::with_options(GroupOptions::default())
    }

    pub fn with_options(options: GroupOptions) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            options: RefCell::new(options),
            state: RefCell::new(GroupState::default()),
            data: DataObservable::new(),
            observers: GroupObservable::default(),
        })
    }

    pub fn options(&self) -> GroupOptions {
        self.options.borrow().clone()
    }

    pub fn set_options(&self, options: GroupOptions) {
        *self.options.borrow_mut() = options;
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.state.borrow().children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of positions contributed by all children.
    pub fn span(&self) -> usize {
        self.state.borrow().children.span()
    }

    pub fn get(&self, index: usize) -> Result<ComponentRef> {
        Ok(self.state.borrow().children.value(index)?.component.clone())
    }

    /// A snapshot of the children, in order.
    pub fn components(&self) -> Vec<ComponentRef> {
        self.state
            .borrow()
            .children
            .values()
            .map(|c| c.component.clone())
            .collect()
    }

    /// The child owning `position`.
    pub fn component_at(&self, position: usize) -> Result<ComponentRef> {
        Ok(self.locate(position)?.0)
    }

    pub fn contains<C: Component + ?Sized>(&self, component: &Rc<C>) -> bool {
        self.state
            .borrow()
            .slots
            .contains(ComponentId::of(component))
    }

    pub fn index_of<C: Component + ?Sized>(&self, component: &Rc<C>) -> Option<usize> {
        self.state.borrow().slots.get(ComponentId::of(component))
    }

    pub fn range_of<C: Component + ?Sized>(&self, component: &Rc<C>) -> Option<Range> {
        let state = self.state.borrow();
        let slot = state.slots.get(ComponentId::of(component))?;
        state.children.range(slot).ok()
    }

    /// Appends `component`.
    pub fn add(&self, component: ComponentRef) -> Result<()> {
        self.add_component(self.len(), component)
    }

    /// Appends every component in order, stopping at the first failure.
    pub fn add_all(&self, components: impl IntoIterator<Item = ComponentRef>) -> Result<()> {
        for component in components {
            self.add(component)?;
        }
        Ok(())
    }

    /// Inserts `component` before the child at `index`.
    ///
    /// Observers see a [`DataEvent::RangeInserted`] covering the new child's count at the
    /// old end of the group, followed by `on_changed`.
    pub fn add_component(&self, index: usize, component: ComponentRef) -> Result<()> {
        self.check_attachable(&component)?;
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }

        let id = ComponentId::of(&component);
        let count = component.count();
        let child = self.make_child(component);
        let original_span = {
            let mut state = self.state.borrow_mut();
            let span = state.children.span();
            state.children.insert(index, child.clone(), count)?;
            state.slots.insert(id, index);
            span
        };
        self.attach(&child);
        self.validate();
        vdebug!(index, count, "ComponentGroup::add_component");

        self.data.notify_range_inserted(original_span, count);
        self.observers.notify_changed();
        Ok(())
    }

    /// Replaces the child at `index` with `component`, keeping its range's lower bound.
    ///
    /// The size difference is reported with the same events as a child-wide
    /// [`DataEvent::Changed`]; the replaced child is then detached and reported through
    /// `on_component_removed`.
    pub fn set_component(&self, index: usize, component: ComponentRef) -> Result<()> {
        self.check_attachable(&component)?;

        let id = ComponentId::of(&component);
        let size = component.count();
        let child = self.make_child(component);
        let replaced = {
            let mut state = self.state.borrow_mut();
            let replaced = state.children.replace(index, child.clone(), size)?;
            state.slots.forget(replaced.value.id());
            state.slots.set(id, index);
            replaced
        };
        self.attach(&child);
        self.validate();
        vdebug!(index, old = replaced.range.size(), new = size, "ComponentGroup::set_component");

        self.notify_range_updated(replaced.range, size);
        self.detach(&replaced.value);
        self.observers.notify_changed();
        Ok(())
    }

    /// Removes and returns the child at `index`.
    pub fn remove(&self, index: usize) -> Result<ComponentRef> {
        let removed = {
            let mut state = self.state.borrow_mut();
            let removed = state.children.remove(index)?;
            state.slots.remove(removed.value.id());
            removed
        };
        self.validate();
        vdebug!(index, count = removed.range.size(), "ComponentGroup::remove");

        self.data
            .notify_range_removed(removed.range.lower, removed.range.size());
        self.detach(&removed.value);
        self.observers.notify_changed();
        Ok(removed.value.component)
    }

    /// Removes `component` if it is a child. Returns whether it was.
    pub fn remove_component<C: Component + ?Sized>(&self, component: &Rc<C>) -> bool {
        match self.index_of(component) {
            Some(index) => self.remove(index).is_ok(),
            None => false,
        }
    }

    /// Detaches every child.
    ///
    /// Each child is reported through `on_component_removed`, then observers see a single
    /// [`DataEvent::Changed`] followed by `on_changed`.
    pub fn clear(&self) {
        let removed = {
            let mut state = self.state.borrow_mut();
            state.slots.clear();
            state.children.drain()
        };
        vdebug!(count = removed.len(), "ComponentGroup::clear");

        for child in &removed {
            self.detach(child);
        }
        self.data.notify_changed();
        self.observers.notify_changed();
    }

    pub fn register_group_observer(&self, observer: Rc<dyn ComponentGroupObserver>) {
        self.observers.register(observer);
    }

    pub fn unregister_group_observer(&self, observer: &Rc<dyn ComponentGroupObserver>) -> bool {
        self.observers.unregister(observer)
    }

    /// Checks that child ranges tile `[0, span)` and that the identity map matches the
    /// child order.
    pub fn is_consistent(&self) -> bool {
        let state = self.state.borrow();
        let mut upper = 0usize;
        for (slot, entry) in state.children.iter().enumerate() {
            if entry.range.lower != upper || state.slots.get(entry.value.id()) != Some(slot) {
                return false;
            }
            upper = entry.range.upper;
        }
        upper == state.children.span() && state.slots.len() == state.children.len()
    }

    fn validate(&self) {
        if self.options.borrow().validate_invariants {
            assert!(self.is_consistent(), "ComponentGroup: inconsistent ranges");
        }
    }

    fn check_attachable(&self, component: &ComponentRef) -> Result<()> {
        let id = ComponentId::of(component);
        if component.data_observable().is_owned() || self.state.borrow().slots.contains(id) {
            vwarn!(?id, "ComponentGroup: component already attached");
            return Err(Error::DuplicateComponent);
        }
        if self.options.borrow().reject_cycles {
            let mut cursor = self.this.upgrade().map(|g| g as ComponentRef);
            while let Some(node) = cursor {
                if ComponentId::of(&node) == id {
                    vwarn!(?id, "ComponentGroup: component would contain itself");
                    return Err(Error::CyclicComposition);
                }
                cursor = node.data_observable().owner();
            }
        }
        Ok(())
    }

    fn make_child(&self, component: ComponentRef) -> Child {
        let translator: Rc<dyn ComponentDataObserver> = Rc::new(ChildObserver {
            group: self.this.clone(),
            child: Rc::downgrade(&component),
            id: ComponentId::of(&component),
        });
        Child {
            component,
            translator,
        }
    }

    fn attach(&self, child: &Child) {
        let observable = child.component.data_observable();
        observable.set_owner(self.this.clone());
        observable.register_observer(child.translator.clone());
    }

    fn detach(&self, child: &Child) {
        let observable = child.component.data_observable();
        observable.unregister_observer(&child.translator);
        observable.clear_owner();
        self.observers.notify_component_removed(&child.component);
    }

    /// The child owning `position` and the position local to it.
    fn locate(&self, position: usize) -> Result<(ComponentRef, usize)> {
        let state = self.state.borrow();
        let entry = state.children.entry_containing(position)?;
        Ok((
            entry.value.component.clone(),
            position - entry.range.lower,
        ))
    }

    fn notify_visibility(&self, position: usize, visible: bool) -> Result<()> {
        let (component, local) = self.locate(position)?;
        // Gaps have no view to track.
        if component.has_gap(local) {
            return Ok(());
        }
        if visible {
            component.on_item_visible(local)
        } else {
            component.on_item_not_visible(local)
        }
    }

    /// Reports a child whose range changed from `range` to `size` positions.
    ///
    /// The overlap is reported as changed and the size difference as inserted or removed
    /// at its tail. Content is always right; animations may land on the wrong position.
    fn notify_range_updated(&self, range: Range, size: usize) {
        let old_size = range.size();
        if size == old_size {
            self.data.notify_range_changed(range.lower, size);
        } else if size > old_size {
            self.data.notify_range_changed(range.lower, old_size);
            self.data
                .notify_range_inserted(range.lower + old_size, size - old_size);
        } else {
            self.data.notify_range_changed(range.lower, size);
            self.data
                .notify_range_removed(range.lower + size, old_size - size);
        }
    }

    fn on_child_event(&self, id: ComponentId, child: &Weak<dyn Component>, event: DataEvent) {
        let slot = self.state.borrow().slots.get(id);
        let Some(slot) = slot else {
            vwarn!(?id, ?event, "ComponentGroup: event from a detached component");
            return;
        };
        vtrace!(slot, ?event, "ComponentGroup::on_child_event");

        let range = match event {
            DataEvent::Changed => {
                let Some(child) = child.upgrade() else {
                    return;
                };
                let size = child.count();
                let range = self.resize_child(slot, |_| size);
                if let Some(range) = range {
                    self.notify_range_updated(range, size);
                }
                range
            }
            DataEvent::RangeInserted { count, .. } => self.resize_child(slot, |size| size + count),
            DataEvent::RangeRemoved { count, .. } => self.resize_child(slot, |size| {
                debug_assert!(count <= size, "child removed more than it had");
                size.saturating_sub(count)
            }),
            DataEvent::RangeChanged { .. } | DataEvent::Moved { .. } => {
                self.state.borrow().children.range(slot).ok()
            }
        };
        let Some(range) = range else {
            vwarn!(slot, "ComponentGroup: lost track of child slot");
            return;
        };
        self.validate();

        if event != DataEvent::Changed {
            self.data.notify(event.offset(range.lower));
        }
        self.observers.notify_changed();
    }

    /// Resizes the child at `slot` and returns its range from before the change.
    fn resize_child(&self, slot: usize, size: impl FnOnce(usize) -> usize) -> Option<Range> {
        let mut state = self.state.borrow_mut();
        let old = state.children.range(slot).ok()?;
        state.children.resize(slot, size(old.size())).ok()
    }
}

impl Component for ComponentGroup {
    fn count(&self) -> usize {
        self.span()
    }

    fn item(&self, position: usize) -> Result<Item> {
        let (component, local) = self.locate(position)?;
        component.item(local)
    }

    fn holder_type(&self, position: usize) -> Result<HolderType> {
        let (component, local) = self.locate(position)?;
        component.holder_type(local)
    }

    fn presenter(&self, position: usize) -> Result<Option<Presenter>> {
        let (component, local) = self.locate(position)?;
        component.presenter(local)
    }

    /// A group position is a gap when the child owning it reports one there.
    fn has_gap(&self, position: usize) -> bool {
        self.locate(position)
            .map(|(component, local)| component.has_gap(local))
            .unwrap_or(false)
    }

    fn on_item_visible(&self, position: usize) -> Result<()> {
        self.notify_visibility(position, true)
    }

    fn on_item_not_visible(&self, position: usize) -> Result<()> {
        self.notify_visibility(position, false)
    }

    fn data_observable(&self) -> &DataObservable {
        &self.data
    }
}

impl Drop for ComponentGroup {
    fn drop(&mut self) {
        for child in self.state.get_mut().children.values() {
            let observable = child.component.data_observable();
            observable.unregister_observer(&child.translator);
            observable.clear_owner();
        }
    }
}

impl fmt::Debug for ComponentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ComponentGroup")
            .field("len", &state.children.len())
            .field("span", &state.children.span())
            .field("options", &*self.options.borrow())
            .finish()
    }
}
