// Example: nested groups flattened into one list, with flat-space change events.
use std::cell::RefCell;
use std::rc::Rc;

use bento::{
    Component, ComponentDataObserver, ComponentGroup, DataEvent, HolderType, ListComponent,
    SimpleComponent,
};

struct Header;
struct Row;

fn main() {
    let root = ComponentGroup::new();
    let section = ComponentGroup::new();

    let title = Rc::new(SimpleComponent::new(
        HolderType::of::<Header>(),
        Rc::new("Inbox"),
    ));
    let rows = Rc::new(ListComponent::new(HolderType::of::<Row>()).with_items(1..=3u32));
    section.add(title).expect("fresh component");
    section.add(rows.clone()).expect("fresh component");

    let footer = Rc::new(ListComponent::new(HolderType::of::<Row>()).with_items([100u32]));
    root.add(section.clone()).expect("fresh component");
    root.add(footer).expect("fresh component");

    // The host only ever sees the root.
    let events = Rc::new(RefCell::new(Vec::new()));
    let recorder: Rc<dyn ComponentDataObserver> = {
        let events = events.clone();
        Rc::new(move |event: DataEvent| events.borrow_mut().push(event))
    };
    root.data_observable().register_observer(recorder);

    println!("count={} children={}", root.count(), root.len());
    for position in 0..root.count() {
        println!(
            "  {position}: {:?}",
            root.holder_type(position).expect("in range")
        );
    }

    // rows sit at [1, 4) in the root; appending lands at 4 and pushes the footer to 5.
    rows.push(4);
    rows.remove(0).expect("non-empty");
    rows.set_data([7, 8, 9, 10, 11]);

    println!("events={:?}", events.borrow());
    println!("rows_range={:?}", section.range_of(&rows));
    println!("count={}", root.count());
}
