use engine::graphics::{CpuRenderer, Renderer2d, text_height, text_width};
use engine::surface::{RgbaBufferSurface, SurfaceSize};
use engine::ui::Rect;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn render_into(surface: &mut RgbaBufferSurface, f: impl FnOnce(&mut dyn Renderer2d)) {
    let size = surface.size();
    let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
    gfx.begin_frame(size);
    f(&mut gfx);
}

#[test]
fn fill_circle_covers_center_and_leaves_corners() {
    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(100, 100));
    render_into(&mut surface, |gfx| {
        gfx.clear([0, 0, 0, 255]);
        gfx.fill_circle(50.0, 50.0, 20.0, WHITE);
    });

    assert_eq!(surface.pixel(50, 50), WHITE);
    // Just inside the radius along the x axis.
    assert_eq!(surface.pixel(50 + 18, 50), WHITE);
    // Well outside the radius: untouched background.
    assert_eq!(surface.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(surface.pixel(50 + 25, 50), [0, 0, 0, 255]);
    // The corner of the bounding square is outside the disc.
    assert_eq!(surface.pixel(50 + 18, 50 + 18), [0, 0, 0, 255]);
}

#[test]
fn fill_circle_clips_at_surface_edges() {
    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(40, 40));
    render_into(&mut surface, |gfx| {
        // Center off-surface on the left; only the right part lands.
        gfx.fill_circle(-5.0, 20.0, 10.0, RED);
    });

    assert_eq!(surface.pixel(0, 20), RED);
    assert_eq!(surface.pixel(10, 20), [0, 0, 0, 0]);
}

#[test]
fn blit_scaled_stretches_a_2x2_source() {
    // 2x2 source: left column red, right column blue.
    let mut src = Vec::new();
    for _ in 0..2 {
        src.extend_from_slice(&RED);
        src.extend_from_slice(&BLUE);
    }

    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(8, 8));
    render_into(&mut surface, |gfx| {
        gfx.blit_scaled(Rect::from_size(8, 8), 2, 2, &src);
    });

    // Nearest-neighbor: left half red, right half blue, every row.
    for y in [0u32, 3, 7] {
        assert_eq!(surface.pixel(0, y), RED);
        assert_eq!(surface.pixel(3, y), RED);
        assert_eq!(surface.pixel(4, y), BLUE);
        assert_eq!(surface.pixel(7, y), BLUE);
    }
}

#[test]
fn blit_scaled_clips_to_the_surface() {
    let src = vec![255u8; 2 * 2 * 4];
    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(4, 4));
    render_into(&mut surface, |gfx| {
        gfx.blit_scaled(Rect::new(2, 2, 10, 10), 2, 2, &src);
    });

    assert_eq!(surface.pixel(3, 3), WHITE);
    assert_eq!(surface.pixel(1, 1), [0, 0, 0, 0]);
}

#[test]
fn blit_scaled_rejects_short_source_buffers() {
    let src = vec![255u8; 3]; // far too small for 2x2 RGBA
    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(4, 4));
    render_into(&mut surface, |gfx| {
        gfx.blit_scaled(Rect::from_size(4, 4), 2, 2, &src);
    });

    assert_eq!(surface.pixel(0, 0), [0, 0, 0, 0]);
}

#[test]
fn draw_text_marks_pixels_within_measured_bounds() {
    let scale = 2;
    let text = "SCORE: 100";
    let w = text_width(text, scale);
    let h = text_height(scale);
    assert!(w > 0 && h > 0);

    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(w + 8, h + 8));
    render_into(&mut surface, |gfx| {
        gfx.clear([0, 0, 0, 255]);
        gfx.draw_text_scaled(4, 4, text, WHITE, scale);
    });

    let frame = surface.frame();
    let lit = frame
        .chunks_exact(4)
        .filter(|px| px[0] == 255 && px[1] == 255 && px[2] == 255)
        .count();
    assert!(lit > 0, "text should rasterize at least one pixel");

    // Nothing may land outside the measured text box (plus its offset).
    let size = surface.size();
    for y in 0..size.height {
        for x in 0..size.width {
            if surface.pixel(x, y) == WHITE {
                assert!(x >= 4 && x < 4 + w && y >= 4 && y < 4 + h);
            }
        }
    }
}

#[test]
fn fill_rect_is_clipped_not_wrapped() {
    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(10, 10));
    render_into(&mut surface, |gfx| {
        gfx.fill_rect(Rect::new(8, 8, 10, 1), RED);
    });

    assert_eq!(surface.pixel(9, 8), RED);
    // A wrapping implementation would bleed onto the next row.
    assert_eq!(surface.pixel(0, 9), [0, 0, 0, 0]);
}
