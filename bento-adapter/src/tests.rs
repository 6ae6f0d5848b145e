use crate::*;

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use bento::{
    Component, ComponentGroup, DataEvent, DataObservable, Error, HolderType, Item, ListComponent,
    Presenter, Result,
};

struct Row;

type Seen = Rc<RefCell<Vec<(usize, bool)>>>;

fn watched(values: &[u32]) -> (Rc<ListComponent<u32>>, Seen) {
    let seen: Seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let list = Rc::new(
        ListComponent::new(HolderType::of::<Row>())
            .with_items(values.iter().copied())
            .with_visibility_listener(move |p, v| log.borrow_mut().push((p, v))),
    );
    (list, seen)
}

#[test]
fn recorder_buffers_flat_space_events() {
    let root = ComponentGroup::new();
    let (head, _) = watched(&[1, 2]);
    let (tail, _) = watched(&[3]);
    root.add(head.clone()).unwrap();
    root.add(tail.clone()).unwrap();

    let recorder = ChangeRecorder::attach(&*root);
    tail.push(4);
    head.remove(0).unwrap();

    assert_eq!(recorder.len(), 2);
    assert_eq!(
        recorder.take(),
        vec![
            DataEvent::RangeInserted { start: 3, count: 1 },
            DataEvent::RangeRemoved { start: 0, count: 1 },
        ]
    );
    assert!(recorder.is_empty());

    assert!(recorder.detach(&*root));
    tail.push(5);
    assert!(recorder.is_empty());
    assert!(!recorder.detach(&*root));
}

#[test]
fn anchor_follows_its_component_across_inserts() {
    let root = ComponentGroup::new();
    let (a, _) = watched(&[1, 2, 3]);
    let (b, _) = watched(&[4, 5, 6, 7]);
    root.add(a.clone()).unwrap();
    root.add(b.clone()).unwrap();

    let anchor = capture_anchor(&root, 5).unwrap();
    assert_eq!(anchor.offset_in_component, 2);

    let (front, _) = watched(&[0, 0]);
    root.add_component(0, front).unwrap();
    a.push(9);
    assert_eq!(resolve_anchor(&root, &anchor), Some(8));

    b.set_data([1]);
    assert_eq!(resolve_anchor(&root, &anchor), Some(6));

    root.remove_component(&b);
    assert_eq!(resolve_anchor(&root, &anchor), None);
    assert!(capture_anchor(&root, 100).is_none());
}

#[test]
fn visibility_tracker_reports_entering_and_leaving_positions() {
    let root = ComponentGroup::new();
    let (a, seen_a) = watched(&[1, 2, 3]);
    let (b, seen_b) = watched(&[4, 5, 6]);
    root.add(a).unwrap();
    root.add(b).unwrap();

    let mut tracker = VisibilityTracker::new();
    tracker.update(&*root, VisibleRange::new(1, 4)).unwrap();
    assert_eq!(*seen_a.borrow(), vec![(1, true), (2, true)]);
    assert_eq!(*seen_b.borrow(), vec![(0, true)]);

    seen_a.borrow_mut().clear();
    seen_b.borrow_mut().clear();
    tracker.update(&*root, VisibleRange::new(3, 10)).unwrap();
    assert_eq!(*seen_a.borrow(), vec![(1, false), (2, false)]);
    assert_eq!(*seen_b.borrow(), vec![(1, true), (2, true)]);
    assert_eq!(tracker.visible(), VisibleRange::new(3, 6));

    seen_b.borrow_mut().clear();
    tracker.clear(&*root).unwrap();
    assert_eq!(*seen_b.borrow(), vec![(0, false), (1, false), (2, false)]);
    assert!(tracker.visible().is_empty());
}

#[test]
fn visibility_tracker_ignores_positions_past_a_shrunk_list() {
    let root = ComponentGroup::new();
    let (a, seen) = watched(&[1, 2, 3, 4]);
    root.add(a.clone()).unwrap();

    let mut tracker = VisibilityTracker::new();
    tracker.update(&*root, VisibleRange::new(0, 4)).unwrap();
    a.set_data([1, 2]);
    seen.borrow_mut().clear();

    tracker.update(&*root, VisibleRange::new(1, 4)).unwrap();
    assert_eq!(*seen.borrow(), vec![(0, false)]);
    assert_eq!(tracker.visible(), VisibleRange::new(1, 2));
}

/// Rejects visibility calls at and after `fail_from`.
struct Refusing {
    fail_from: usize,
    data: DataObservable,
}

impl Component for Refusing {
    fn count(&self) -> usize {
        4
    }

    fn item(&self, position: usize) -> Result<Item> {
        bento::check_position(position, 4)?;
        let item: Item = Rc::new(position);
        Ok(item)
    }

    fn holder_type(&self, position: usize) -> Result<HolderType> {
        bento::check_position(position, 4)?;
        Ok(HolderType::of::<Row>())
    }

    fn presenter(&self, _position: usize) -> Result<Option<Presenter>> {
        Ok(None)
    }

    fn on_item_visible(&self, position: usize) -> Result<()> {
        if position >= self.fail_from {
            return Err(Error::PositionOutOfRange {
                position,
                span: self.fail_from,
            });
        }
        Ok(())
    }

    fn data_observable(&self) -> &DataObservable {
        &self.data
    }
}

#[test]
fn visibility_tracker_keeps_the_old_range_when_a_callback_fails() {
    let root = Refusing {
        fail_from: 2,
        data: DataObservable::new(),
    };
    let mut tracker = VisibilityTracker::new();
    tracker.update(&root, VisibleRange::new(0, 2)).unwrap();

    assert_eq!(
        tracker.update(&root, VisibleRange::new(1, 4)),
        Err(Error::PositionOutOfRange {
            position: 2,
            span: 2
        })
    );
    assert_eq!(tracker.visible(), VisibleRange::new(0, 2));
}

#[test]
fn controller_drains_events_and_tracks_visibility() {
    let root = ComponentGroup::new();
    let mut controller = Controller::new(root.clone());
    assert!(!controller.has_pending_events());

    let (rows, seen) = watched(&[1, 2, 3]);
    root.add(rows.clone()).unwrap();
    assert_eq!(controller.item_count(), 3);
    assert_eq!(
        controller.drain_events(),
        vec![DataEvent::RangeInserted { start: 0, count: 3 }]
    );

    controller.on_visible_range(1, 3).unwrap();
    assert_eq!(*seen.borrow(), vec![(1, true), (2, true)]);
    assert_eq!(controller.visible_range(), VisibleRange::new(1, 3));

    let anchor = controller.anchor_first_visible().unwrap();
    let (header, _) = watched(&[0]);
    root.add_component(0, header).unwrap();
    assert_eq!(controller.resolve(&anchor), Some(2));
    assert_eq!(controller.anchor_at(0).map(|a| a.offset_in_component), Some(0));
    assert_eq!(root.count(), 4);
}

#[test]
fn dropping_the_controller_unregisters_it() {
    let root = ComponentGroup::new();
    let before = root.data_observable().observer_count();
    {
        let _controller = Controller::new(root.clone());
        assert_eq!(root.data_observable().observer_count(), before + 1);
    }
    assert_eq!(root.data_observable().observer_count(), before);
}
