use std::rc::Rc;

use bento::{ComponentGroup, HolderType, ListComponent};
use bento_adapter::Controller;

struct Message;

fn main() {
    // Example: keep the first visible message in place while older ones load above it.
    //
    // 1) capture an anchor (component + offset inside it) before data changes
    // 2) apply data changes, anywhere in the tree
    // 3) resolve the anchor to find where the same item lives now
    let root = ComponentGroup::new();
    let mut c = Controller::new(root.clone());

    let recent = Rc::new(ListComponent::new(HolderType::of::<Message>()).with_items(0..50u32));
    root.add(recent).expect("fresh component");
    c.on_visible_range(20, 30).expect("visibility hooks succeed");
    println!("before: events={:?}", c.drain_events());

    let anchor = c
        .anchor_first_visible()
        .expect("visible range must not be empty");
    println!("anchor={anchor:?} at={:?}", c.resolve(&anchor));

    let older = Rc::new(ListComponent::new(HolderType::of::<Message>()).with_items(0..10u32));
    root.add_component(0, older).expect("fresh component");

    let at = c.resolve(&anchor).expect("anchored component still attached");
    println!("after prepend: events={:?} first_visible={at}", c.drain_events());
    c.on_visible_range(at, at + 10)
        .expect("visibility hooks succeed");
    println!("visible={:?} count={}", c.visible_range(), c.item_count());
}
