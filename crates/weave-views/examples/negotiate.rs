//! Renders a small screen, logging each negotiation pass, and prints the laid out tree.
//!
//! Run with `RUST_LOG=debug` to see the passes.

use weave::{DebugOptions, Rect, RenderOptions, Runtime, View};
use weave_views::{Divider, HStack, Rectangle, Spacer, Text, VStack, ZStack};

fn main() {
    env_logger::init();

    let sidebar = VStack::new([
        Text::new("Inbox").into(),
        Text::new("Archive").into(),
        Divider::new().into(),
        Spacer::new().into(),
        Text::new("Settings").font_size(12.0).into(),
    ]);
    let content = ZStack::new([
        Rectangle::new().into(),
        Text::new("Nothing selected").into(),
    ]);
    let screen: View = HStack::new([sidebar.into(), content.into()])
        .spacing(0.0)
        .into();

    let mut runtime = Runtime::with_options(RenderOptions::new().with_log_passes(true));
    let frame = runtime.layout(
        &screen.padding(10.0),
        Rect::from_min_size([0.0, 0.0], [640.0, 480.0]),
    );

    println!(
        "settled: {} after {} pass(es)",
        frame.settled, frame.passes
    );
    print!("{}", frame.dump(DebugOptions::all()));
}
