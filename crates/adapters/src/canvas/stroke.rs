use sketchboard_domain::{Color, RGBA_CHANNELS};

/// One freehand polyline, painted with the brush active when it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke {
    width: u32,
    color: Color,
    points: Vec<(i32, i32)>,
}

impl Stroke {
    pub(crate) fn start(width: u32, color: Color, origin: (i32, i32)) -> Self {
        Self {
            width,
            color,
            points: vec![origin],
        }
    }

    pub fn points(&self) -> &[(i32, i32)] {
        &self.points
    }

    /// Appends a point and returns the previous end of the line, or `None`
    /// when the pointer has not moved.
    pub(crate) fn push(&mut self, point: (i32, i32)) -> Option<(i32, i32)> {
        let last = *self.points.last()?;
        if last == point {
            return None;
        }
        self.points.push(point);
        Some(last)
    }

    pub(crate) fn paint(&self, pixels: &mut [u8], width: u32, height: u32) {
        let Some(&first) = self.points.first() else {
            return;
        };
        self.paint_segment(pixels, width, height, first, first);
        for pair in self.points.windows(2) {
            self.paint_segment(pixels, width, height, pair[0], pair[1]);
        }
    }

    pub(crate) fn paint_segment(
        &self,
        pixels: &mut [u8],
        width: u32,
        height: u32,
        from: (i32, i32),
        to: (i32, i32),
    ) {
        let rgba = self.color.to_rgba();
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            stamp(pixels, width, height, from, self.width, rgba);
            return;
        }

        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = from.0 + (dx as f32 * t).round() as i32;
            let y = from.1 + (dy as f32 * t).round() as i32;
            stamp(pixels, width, height, (x, y), self.width, rgba);
        }
    }
}

/// Paints a disc exactly `diameter` pixels across. Odd diameters are centred
/// on the pixel, even ones on its upper-left corner.
fn stamp(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    center: (i32, i32),
    diameter: u32,
    rgba: [u8; 4],
) {
    let diameter = diameter.max(1) as i32;
    let first = -(diameter / 2);
    let offset = if diameter % 2 == 0 { 0.5 } else { 0.0 };
    let radius = diameter as f32 / 2.0;
    let radius_sq = radius * radius;
    let channels = usize::from(RGBA_CHANNELS);

    for oy in first..first + diameter {
        let y = center.1 + oy;
        if y < 0 || y >= height as i32 {
            continue;
        }
        let fy = oy as f32 + offset;
        for ox in first..first + diameter {
            let x = center.0 + ox;
            if x < 0 || x >= width as i32 {
                continue;
            }
            let fx = ox as f32 + offset;
            if fx * fx + fy * fy > radius_sq {
                continue;
            }
            let index = (y as usize * width as usize + x as usize) * channels;
            pixels[index..index + channels].copy_from_slice(&rgba);
        }
    }
}
