// Example: adapter-driven drag, flick, and spring settle at 60fps.
use carousel::{CarouselOptions, InputKind};
use carousel_adapter::Controller;

fn main() {
    let mut c = Controller::new(CarouselOptions::new(8).with_initial_viewport_width(Some(1200.0)))
        .expect("default options are valid");

    let mut now_ms = 0u64;
    c.on_drag_start(InputKind::Touch, now_ms);

    // Simulate a quick leftward swipe: 6 frames of -40px.
    for _ in 0..6 {
        now_ms += 16;
        c.on_drag_move(-40.0, now_ms);
    }
    let target = c.on_drag_end(now_ms, None).expect("carousel is enabled");
    println!(
        "released at index {:.3} with {:.0}px/s -> target {}",
        target.raw_index, target.velocity, target.index
    );

    let mut frame = 0u64;
    while let Some(position) = c.tick(now_ms) {
        now_ms += 16;
        frame += 1;
        if frame % 5 == 0 {
            println!(
                "t={now_ms}ms position={position:.1} index={:.3}",
                c.carousel().virtual_index().unwrap_or_default()
            );
        }
    }

    // A resize keeps the same card centered.
    c.on_resize(375.0);
    println!(
        "done: centered={:?} original={:?} position={:.1}",
        c.carousel().centered_index(),
        c.carousel().centered_original_index(),
        c.carousel().position()
    );
}
