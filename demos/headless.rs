use maplet_print::prelude::*;

/// Example of framing a print without any UI
fn main() -> maplet_print::Result<()> {
    #[cfg(feature = "debug")]
    env_logger::init();

    println!("🗺️ Maplet Print Headless Example");
    println!("================================");

    let center = LatLng::new(37.7749, -122.4194); // San Francisco
    let map = Map::new(center, 12.0, Point::new(1024.0, 768.0)).into_handle();

    let layout = Arc::new(PrintLayout::new(
        PrintLayoutOptions::new()
            .with_format(PaperFormat::A4)
            .with_orientation(Orientation::Landscape)
            .with_margins(Margins::uniform(1.5)),
    )?);
    layout.subscribe(|event| {
        println!("   🔔 {:?}", event.kind);
    });

    map.add_control(layout.clone())?;
    map.render()?;
    println!("✅ Overlay attached: {:?}", layout.attachment_state());
    report(&layout);

    println!("\n🎯 Moving the map:");
    let locations = [
        ("New York", LatLng::new(40.7128, -74.0060), 11.0),
        ("London", LatLng::new(51.5074, -0.1278), 10.0),
    ];
    for (name, location, zoom) in locations {
        map.lock().set_view(location, zoom);
        println!("   📍 {} at zoom {}", name, zoom);
        report(&layout);
    }

    println!("\n📄 Changing the paper:");
    for format in ["A3", "letter", "A10"] {
        match layout.set_format(format) {
            Ok(()) => report(&layout),
            Err(err) => println!("   ❌ {}", err),
        }
    }

    map.lock().set_size(Point::new(1920.0, 1080.0));
    let frame = layout.layout().frame;
    println!(
        "\n🖥️ Resized, sheet is now {:.0}x{:.0}px",
        frame.width(),
        frame.height()
    );

    map.remove_control(layout.id())?;
    println!("\n✅ Overlay removed: {:?}", layout.attachment_state());
    Ok(())
}

fn report(layout: &PrintLayout) {
    let mm = layout.print_box_size_in_millimeters();
    let dots = layout.print_box_size_in_dots(None);
    println!(
        "   {} {}: {:.0}x{:.0} mm, {}x{} dots at {} dpi",
        layout.format(),
        layout.orientation(),
        mm.width,
        mm.height,
        dots.width,
        dots.height,
        layout.dpi()
    );
    if let Some(bbox) = layout.bounding_box_lon_lat() {
        println!(
            "   extent [{:.4}, {:.4}, {:.4}, {:.4}]",
            bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y
        );
    }
    if let Some(scale) = layout.print_scale_denominator() {
        println!("   scale 1:{:.0}", scale);
    }
}
