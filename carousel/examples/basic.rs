// Example: drive the core state machine by hand and print per-card transforms.
use carousel::{Carousel, CarouselOptions, InputKind, Item, WorkingSet};

fn main() {
    let items: Vec<Item> = [
        "Sashimi Selection",
        "Nigiri Art",
        "Maki Rolls",
        "Chef Special",
        "Omakase",
        "Tuna Tataki",
        "Dragon Roll",
        "Sake Selection",
    ]
    .iter()
    .enumerate()
    .map(|(i, title)| Item::new(i as u64 + 1, *title))
    .collect();
    let working = WorkingSet::new(&items);

    let mut c = Carousel::new(
        CarouselOptions::new_with_key(items.len(), {
            let ids: Vec<u64> = items.iter().map(|it| it.id).collect();
            move |i| ids[i]
        })
        .with_initial_viewport_width(Some(1200.0)),
    )
    .expect("default options are valid");

    println!(
        "home: position={} centered={:?}",
        c.position(),
        c.centered_index()
    );

    // One card to the right, released with a leftward flick.
    c.begin_drag(InputKind::Pointer);
    c.drag_by(362.0, None);
    let target = c.end_drag(Some(-600.0)).expect("carousel is enabled");
    println!(
        "release: raw_index={} swiped={} target={}",
        target.raw_index, target.swiped, target.index
    );

    // Without an adapter, land on the target directly.
    c.finish_settle();

    c.for_each_render_descriptor(|d| {
        if d.z_index < 8 {
            return;
        }
        let item = working.get(d.index).expect("index in working set");
        println!(
            "#{:>2} {:<18} x={:>8.1} scale={:.2} opacity={:.2} z={}",
            d.index, item.title, d.position_offset, d.scale, d.opacity, d.z_index
        );
    });
}
