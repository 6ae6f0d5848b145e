use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::component::check_position;
use crate::{Component, DataObservable, Error, HolderType, Item, Presenter, Result};

type VisibilityListener = Box<dyn Fn(usize, bool)>;

/// A leaf component backed by a `Vec`, one position per item.
///
/// Every mutation reports the narrowest matching [`crate::DataEvent`]; only
/// [`ListComponent::set_data`] falls back to a component-wide `Changed`.
pub struct ListComponent<T> {
    items: RefCell<Vec<Rc<T>>>,
    holder_type: HolderType,
    presenter: Option<Presenter>,
    on_visibility: Option<VisibilityListener>,
    data: DataObservable,
}

impl<T: 'static> ListComponent<T> {
    pub fn new(holder_type: HolderType) -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            holder_type,
            presenter: None,
            on_visibility: None,
            data: DataObservable::new(),
        }
    }

    pub fn with_items(self, items: impl IntoIterator<Item = T>) -> Self {
        *self.items.borrow_mut() = items.into_iter().map(Rc::new).collect();
        self
    }

    pub fn with_presenter(mut self, presenter: Presenter) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// Calls `f(position, visible)` whenever an item scrolls on or off screen.
    pub fn with_visibility_listener(mut self, f: impl Fn(usize, bool) + 'static) -> Self {
        self.on_visibility = Some(Box::new(f));
        self
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Rc<T>> {
        self.items.borrow().get(index).cloned()
    }

    /// Replaces every item.
    pub fn set_data(&self, items: impl IntoIterator<Item = T>) {
        *self.items.borrow_mut() = items.into_iter().map(Rc::new).collect();
        self.data.notify_changed();
    }

    pub fn push(&self, item: T) {
        let index = {
            let mut items = self.items.borrow_mut();
            items.push(Rc::new(item));
            items.len() - 1
        };
        self.data.notify_range_inserted(index, 1);
    }

    pub fn append(&self, items: impl IntoIterator<Item = T>) {
        let (start, count) = {
            let mut list = self.items.borrow_mut();
            let start = list.len();
            list.extend(items.into_iter().map(Rc::new));
            (start, list.len() - start)
        };
        if count > 0 {
            self.data.notify_range_inserted(start, count);
        }
    }

    pub fn insert(&self, index: usize, item: T) -> Result<()> {
        {
            let mut items = self.items.borrow_mut();
            let len = items.len();
            if index > len {
                return Err(Error::IndexOutOfRange { index, len });
            }
            items.insert(index, Rc::new(item));
        }
        self.data.notify_range_inserted(index, 1);
        Ok(())
    }

    pub fn remove(&self, index: usize) -> Result<Rc<T>> {
        let removed = {
            let mut items = self.items.borrow_mut();
            let len = items.len();
            if index >= len {
                return Err(Error::IndexOutOfRange { index, len });
            }
            items.remove(index)
        };
        self.data.notify_range_removed(index, 1);
        Ok(removed)
    }

    pub fn replace(&self, index: usize, item: T) -> Result<Rc<T>> {
        let old = {
            let mut items = self.items.borrow_mut();
            let len = items.len();
            let slot = items
                .get_mut(index)
                .ok_or(Error::IndexOutOfRange { index, len })?;
            core::mem::replace(slot, Rc::new(item))
        };
        self.data.notify_range_changed(index, 1);
        Ok(old)
    }

    pub fn move_item(&self, from: usize, to: usize) -> Result<()> {
        {
            let mut items = self.items.borrow_mut();
            let len = items.len();
            for index in [from, to] {
                if index >= len {
                    return Err(Error::IndexOutOfRange { index, len });
                }
            }
            let item = items.remove(from);
            items.insert(to, item);
        }
        self.data.notify_moved(from, to);
        Ok(())
    }

    pub fn clear(&self) {
        let count = {
            let mut items = self.items.borrow_mut();
            let count = items.len();
            items.clear();
            count
        };
        if count > 0 {
            self.data.notify_range_removed(0, count);
        }
    }
}

impl<T: 'static> Component for ListComponent<T> {
    fn count(&self) -> usize {
        self.len()
    }

    fn item(&self, position: usize) -> Result<Item> {
        let items = self.items.borrow();
        check_position(position, items.len())?;
        let item: Item = items[position].clone();
        Ok(item)
    }

    fn holder_type(&self, position: usize) -> Result<HolderType> {
        check_position(position, self.len())?;
        Ok(self.holder_type)
    }

    fn presenter(&self, position: usize) -> Result<Option<Presenter>> {
        check_position(position, self.len())?;
        Ok(self.presenter.clone())
    }

    fn on_item_visible(&self, position: usize) -> Result<()> {
        if let Some(f) = &self.on_visibility {
            f(position, true);
        }
        Ok(())
    }

    fn on_item_not_visible(&self, position: usize) -> Result<()> {
        if let Some(f) = &self.on_visibility {
            f(position, false);
        }
        Ok(())
    }

    fn data_observable(&self) -> &DataObservable {
        &self.data
    }
}

impl<T> fmt::Debug for ListComponent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListComponent")
            .field("len", &self.items.borrow().len())
            .field("holder_type", &self.holder_type)
            .finish()
    }
}

/// A component with exactly one item.
pub struct SimpleComponent {
    item: RefCell<Item>,
    holder_type: HolderType,
    presenter: Option<Presenter>,
    data: DataObservable,
}

impl SimpleComponent {
    pub fn new(holder_type: HolderType, item: Item) -> Self {
        Self {
            item: RefCell::new(item),
            holder_type,
            presenter: None,
            data: DataObservable::new(),
        }
    }

    pub fn with_presenter(mut self, presenter: Presenter) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn set_item(&self, item: Item) {
        *self.item.borrow_mut() = item;
        self.notify_changed();
    }

    /// Asks the host to rebind the single item.
    pub fn notify_changed(&self) {
        self.data.notify_range_changed(0, 1);
    }
}

impl Component for SimpleComponent {
    fn count(&self) -> usize {
        1
    }

    fn item(&self, position: usize) -> Result<Item> {
        check_position(position, 1)?;
        Ok(self.item.borrow().clone())
    }

    fn holder_type(&self, position: usize) -> Result<HolderType> {
        check_position(position, 1)?;
        Ok(self.holder_type)
    }

    fn presenter(&self, position: usize) -> Result<Option<Presenter>> {
        check_position(position, 1)?;
        Ok(self.presenter.clone())
    }

    fn data_observable(&self) -> &DataObservable {
        &self.data
    }
}

impl fmt::Debug for SimpleComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleComponent")
            .field("holder_type", &self.holder_type)
            .finish()
    }
}
