use pdf_images::constants::{PAGE_MARGIN_MM, PIXEL_TO_MM};
use pdf_images::*;

const PAGES: [(f32, f32); 4] = [
    (210.0, 297.0),
    (297.0, 210.0),
    (215.9, 279.4),
    (148.0, 210.0),
];

const IMAGES: [(f32, f32); 7] = [
    (800.0, 600.0),
    (600.0, 800.0),
    (1.0, 1.0),
    (4000.0, 3000.0),
    (10000.0, 20.0),
    (20.0, 10000.0),
    (333.0, 333.0),
];

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_fit_a4_scenario() {
    let g = compute_layout(800.0, 600.0, 210.0, 297.0, FitMode::Fit);
    assert!(approx(g.width, 190.0), "width {}", g.width);
    assert!(approx(g.height, 142.5), "height {}", g.height);
    assert!(approx(g.x, 10.0), "x {}", g.x);
    assert!(approx(g.y, 77.25), "y {}", g.y);
}

#[test]
fn test_fit_preserves_aspect_and_centers() {
    for &(pw, ph) in &PAGES {
        for &(iw, ih) in &IMAGES {
            let g = compute_layout(iw, ih, pw, ph, FitMode::Fit);

            let expected = iw / ih;
            let actual = g.width / g.height;
            assert!(
                (actual - expected).abs() / expected < 1e-4,
                "aspect {actual} vs {expected} for {iw}x{ih} on {pw}x{ph}"
            );
            assert!(approx(g.x, (pw - g.width) / 2.0));
            assert!(approx(g.y, (ph - g.height) / 2.0));

            assert!(g.right() <= pw + 1e-3);
            assert!(g.bottom() <= ph + 1e-3);
            assert!(g.width <= pw - 2.0 * PAGE_MARGIN_MM + 1e-3);
            assert!(g.height <= ph - 2.0 * PAGE_MARGIN_MM + 1e-3);
        }
    }
}

#[test]
fn test_fit_touches_one_margin() {
    // Uniform scaling stops at whichever side runs out first
    let g = compute_layout(600.0, 800.0, 210.0, 297.0, FitMode::Fit);
    let touches_width = approx(g.width, 190.0);
    let touches_height = approx(g.height, 277.0);
    assert!(touches_width || touches_height);
}

#[test]
fn test_fill_matches_margin_box() {
    for &(pw, ph) in &PAGES {
        for &(iw, ih) in &IMAGES {
            let g = compute_layout(iw, ih, pw, ph, FitMode::Fill);
            assert_eq!(g.x, PAGE_MARGIN_MM);
            assert_eq!(g.y, PAGE_MARGIN_MM);
            assert!(approx(g.width, pw - 2.0 * PAGE_MARGIN_MM));
            assert!(approx(g.height, ph - 2.0 * PAGE_MARGIN_MM));
        }
    }
}

#[test]
fn test_original_clamps_each_axis() {
    for &(pw, ph) in &PAGES {
        for &(iw, ih) in &IMAGES {
            let g = compute_layout(iw, ih, pw, ph, FitMode::Original);
            let aw = pw - 2.0 * PAGE_MARGIN_MM;
            let ah = ph - 2.0 * PAGE_MARGIN_MM;

            assert!(approx(g.width, (iw * PIXEL_TO_MM).min(aw)));
            assert!(approx(g.height, (ih * PIXEL_TO_MM).min(ah)));
            assert!(g.width <= aw + 1e-3);
            assert!(g.height <= ah + 1e-3);
            assert!(approx(g.x, (pw - g.width) / 2.0));
            assert!(approx(g.y, (ph - g.height) / 2.0));
        }
    }
}

#[test]
fn test_original_small_image_keeps_native_size() {
    let g = compute_layout(100.0, 50.0, 210.0, 297.0, FitMode::Original);
    assert!(approx(g.width, 35.2778));
    assert!(approx(g.height, 17.6389));
}

#[test]
fn test_original_wide_image_changes_aspect() {
    // Only the width is clamped
    let g = compute_layout(10000.0, 20.0, 210.0, 297.0, FitMode::Original);
    assert!(approx(g.width, 190.0));
    assert!(approx(g.height, 20.0 * PIXEL_TO_MM));
}
