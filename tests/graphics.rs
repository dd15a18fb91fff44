mod common;

use common::*;
use embedded_graphics::{
    pixelcolor::{Rgb565, RgbColor},
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

#[test]
fn filled_rectangle_becomes_one_window() {
    let (mut display, log) = display();
    Rectangle::new(Point::new(10, 20), Size::new(30, 5))
        .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
        .draw(&mut display)
        .unwrap();

    let sessions = sessions(&log);
    assert_eq!(sessions.len(), 6);
    assert_eq!(sessions[..5], window(10, 20, 39, 24)[..]);
}

#[test]
fn negative_origin_is_cut_to_visible_part() {
    let (mut display, log) = display();
    display
        .fill_solid(
            &Rectangle::new(Point::new(-5, -5), Size::new(10, 10)),
            Rgb565::GREEN,
        )
        .unwrap();

    let sessions = sessions(&log);
    assert_eq!(sessions[..5], window(0, 0, 4, 4)[..]);
    let Session::Data(payload) = &sessions[5] else {
        panic!("expected payload");
    };
    assert_eq!(pixels(payload).len(), 25);
}

#[test]
fn fill_contiguous_skips_colors_outside_panel() {
    let (mut display, log) = display();
    // 3x2 area hanging one column off the left edge
    let colors = (0u8..6).map(|i| Rgb565::new(0, 0, i));
    display
        .fill_contiguous(&Rectangle::new(Point::new(-1, 0), Size::new(3, 2)), colors)
        .unwrap();

    let sessions = sessions(&log);
    assert_eq!(sessions[..5], window(0, 0, 1, 1)[..]);
    let Session::Data(payload) = &sessions[5] else {
        panic!("expected payload");
    };
    assert_eq!(pixels(payload), [1, 2, 4, 5]);
}

#[test]
fn fully_hidden_area_sends_nothing() {
    let (mut display, log) = display();
    display
        .fill_solid(
            &Rectangle::new(Point::new(-20, 0), Size::new(10, 10)),
            Rgb565::RED,
        )
        .unwrap();
    display
        .fill_contiguous(
            &Rectangle::new(Point::new(400, 0), Size::new(2, 2)),
            [Rgb565::RED; 4],
        )
        .unwrap();

    assert!(log.borrow().is_empty());
}

#[test]
fn single_pixels_get_one_by_one_windows() {
    let (mut display, log) = display();
    display
        .draw_iter([
            Pixel(Point::new(7, 9), Rgb565::WHITE),
            Pixel(Point::new(-1, 9), Rgb565::WHITE),
        ])
        .unwrap();

    let sessions = sessions(&log);
    assert_eq!(sessions.len(), 6);
    assert_eq!(sessions[..5], window(7, 9, 7, 9)[..]);
    assert_eq!(sessions[5], data(&[0xFF, 0xFF]));
}

#[test]
fn clear_is_fill_screen() {
    let (mut display, log) = display();
    display.clear(Rgb565::BLUE).unwrap();
    assert_eq!(sessions(&log)[..5], window(0, 0, 319, 239)[..]);
    assert_eq!(display.bounding_box().size, Size::new(320, 240));
}
