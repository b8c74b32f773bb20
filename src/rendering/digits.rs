use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

// Seven-segment bit layout: A top, B top-right, C bottom-right, D bottom,
// E bottom-left, F top-left, G middle.
const SEG_A: u8 = 1 << 0;
const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;
const SEG_D: u8 = 1 << 3;
const SEG_E: u8 = 1 << 4;
const SEG_F: u8 = 1 << 5;
const SEG_G: u8 = 1 << 6;

const DIGIT_SEGMENTS: [u8; 10] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,         // 0
    SEG_B | SEG_C,                                         // 1
    SEG_A | SEG_B | SEG_G | SEG_E | SEG_D,                 // 2
    SEG_A | SEG_B | SEG_G | SEG_C | SEG_D,                 // 3
    SEG_F | SEG_G | SEG_B | SEG_C,                         // 4
    SEG_A | SEG_F | SEG_G | SEG_C | SEG_D,                 // 5
    SEG_A | SEG_F | SEG_G | SEG_E | SEG_C | SEG_D,         // 6
    SEG_A | SEG_B | SEG_C,                                 // 7
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G, // 8
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,         // 9
];

/// Width of one glyph cell for a given height.
pub fn digit_width(height: f32) -> f32 {
    height * 0.55
}

fn stroke_segments(
    canvas: &mut Pixmap,
    mask: u8,
    x: f32,
    y: f32,
    height: f32,
    paint: &Paint,
    stroke: &Stroke,
) {
    let w = digit_width(height);
    let ym = y + height / 2.0;
    let yb = y + height;
    let segments: [(u8, (f32, f32), (f32, f32)); 7] = [
        (SEG_A, (x, y), (x + w, y)),
        (SEG_B, (x + w, y), (x + w, ym)),
        (SEG_C, (x + w, ym), (x + w, yb)),
        (SEG_D, (x, yb), (x + w, yb)),
        (SEG_E, (x, ym), (x, yb)),
        (SEG_F, (x, y), (x, ym)),
        (SEG_G, (x, ym), (x + w, ym)),
    ];

    let mut pb = PathBuilder::new();
    for (bit, from, to) in segments {
        if mask & bit != 0 {
            pb.move_to(from.0, from.1);
            pb.line_to(to.0, to.1);
        }
    }
    if let Some(path) = pb.finish() {
        canvas.stroke_path(&path, paint, stroke, Transform::identity(), None);
    }
}

/// Draw an integer as seven-segment glyphs, right-aligned at `right_x`.
/// Returns the left edge of what was drawn.
pub fn draw_number(
    canvas: &mut Pixmap,
    value: i64,
    right_x: f32,
    top_y: f32,
    height: f32,
    paint: &Paint,
    stroke: &Stroke,
) -> f32 {
    let w = digit_width(height);
    let advance = w + height * 0.25;
    let negative = value < 0;
    let mut remaining = value.unsigned_abs();
    let mut x = right_x - w;

    loop {
        let digit = (remaining % 10) as usize;
        stroke_segments(canvas, DIGIT_SEGMENTS[digit], x, top_y, height, paint, stroke);
        remaining /= 10;
        if remaining == 0 {
            break;
        }
        x -= advance;
    }

    if negative {
        x -= advance;
        stroke_segments(canvas, SEG_G, x, top_y, height, paint, stroke);
    }

    x
}
