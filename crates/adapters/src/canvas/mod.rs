mod stroke;

use sketchboard_application::{ApplicationError, CanvasSource};
use sketchboard_domain::{BrushSettings, CanvasSnapshot, PixelBuffer, RGBA_CHANNELS};

pub use stroke::Stroke;

/// In-memory freehand drawing surface backed by an RGBA raster.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    width: u32,
    height: u32,
    brush: BrushSettings,
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
    pixels: Vec<u8>,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32, brush: BrushSettings) -> Result<Self, ApplicationError> {
        if width == 0 || height == 0 {
            return Err(ApplicationError::InvalidInput(format!(
                "canvas must have a positive size, got {width}x{height}"
            )));
        }
        brush.validate()?;

        let mut canvas = Self {
            width,
            height,
            brush,
            strokes: Vec::new(),
            active: None,
            pixels: vec![0; width as usize * height as usize * usize::from(RGBA_CHANNELS)],
        };
        canvas.repaint();
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    /// New strokes pick up width and color; a background change repaints
    /// under the existing strokes.
    pub fn set_brush(&mut self, brush: BrushSettings) -> Result<(), ApplicationError> {
        brush.validate()?;
        let background_changed = brush.background_color != self.brush.background_color;
        self.brush = brush;
        if background_changed {
            self.repaint();
        }
        Ok(())
    }

    pub fn begin_stroke(&mut self, x: i32, y: i32) {
        self.end_stroke();
        let stroke = Stroke::start(self.brush.stroke_width, self.brush.stroke_color, (x, y));
        stroke.paint_segment(&mut self.pixels, self.width, self.height, (x, y), (x, y));
        self.active = Some(stroke);
    }

    pub fn extend_stroke(&mut self, x: i32, y: i32) {
        let Some(stroke) = self.active.as_mut() else {
            return;
        };
        let Some(last) = stroke.push((x, y)) else {
            return;
        };
        stroke.paint_segment(&mut self.pixels, self.width, self.height, last, (x, y));
    }

    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.active.take() {
            self.strokes.push(stroke);
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Removes the most recent stroke. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        if self.strokes.pop().is_none() {
            return false;
        }
        self.repaint();
        true
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.strokes.clear();
        self.repaint();
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len() + usize::from(self.active.is_some())
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn repaint(&mut self) {
        let background = self.brush.background_color.to_rgba();
        for pixel in self.pixels.chunks_exact_mut(usize::from(RGBA_CHANNELS)) {
            pixel.copy_from_slice(&background);
        }
        for stroke in self.strokes.iter().chain(self.active.iter()) {
            stroke.paint(&mut self.pixels, self.width, self.height);
        }
    }
}

impl CanvasSource for RasterCanvas {
    fn snapshot(&self) -> CanvasSnapshot {
        if self.stroke_count() == 0 {
            return CanvasSnapshot::Empty;
        }
        match PixelBuffer::from_rgba(self.width, self.height, self.pixels.clone()) {
            Ok(buffer) => CanvasSnapshot::Drawn(buffer),
            Err(error) => {
                log::error!("canvas raster is inconsistent: {error}");
                CanvasSnapshot::Empty
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sketchboard_domain::{Color, DomainError};

    use super::*;

    fn pixel_at(canvas: &RasterCanvas, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * canvas.width() + x) * 4) as usize;
        let mut pixel = [0; 4];
        pixel.copy_from_slice(&canvas.pixels()[offset..offset + 4]);
        pixel
    }

    fn canvas() -> RasterCanvas {
        RasterCanvas::new(40, 30, BrushSettings::default()).expect("canvas")
    }

    #[test]
    fn untouched_canvas_snapshots_as_empty() {
        let canvas = canvas();
        assert!(canvas.snapshot().is_empty());
        assert_eq!(pixel_at(&canvas, 0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn stroke_paints_along_segment_with_brush_color() {
        let mut canvas = canvas();
        canvas.begin_stroke(5, 10);
        canvas.extend_stroke(30, 10);
        canvas.end_stroke();

        assert_eq!(pixel_at(&canvas, 5, 10), [0, 0, 0, 255]);
        assert_eq!(pixel_at(&canvas, 18, 10), [0, 0, 0, 255]);
        assert_eq!(pixel_at(&canvas, 30, 10), [0, 0, 0, 255]);
        assert_eq!(pixel_at(&canvas, 18, 20), [255, 255, 255, 255]);

        let CanvasSnapshot::Drawn(buffer) = canvas.snapshot() else {
            panic!("canvas with a stroke should not be empty");
        };
        assert_eq!((buffer.width(), buffer.height(), buffer.channels()), (40, 30, 4));
    }

    #[test]
    fn stroke_width_controls_stamp_radius() {
        let mut canvas = canvas();
        canvas
            .set_brush(BrushSettings {
                stroke_width: 9,
                ..BrushSettings::default()
            })
            .expect("brush");
        canvas.begin_stroke(20, 15);
        canvas.end_stroke();

        assert_eq!(pixel_at(&canvas, 24, 15), [0, 0, 0, 255]);
        assert_eq!(pixel_at(&canvas, 26, 15), [255, 255, 255, 255]);
    }

    #[test]
    fn even_stroke_width_paints_exactly_that_many_pixels_across() {
        let mut canvas = canvas();
        canvas
            .set_brush(BrushSettings {
                stroke_width: 4,
                ..BrushSettings::default()
            })
            .expect("brush");
        canvas.begin_stroke(20, 15);
        canvas.end_stroke();

        let painted: Vec<u32> = (0..canvas.width())
            .filter(|&x| pixel_at(&canvas, x, 15) == [0, 0, 0, 255])
            .collect();
        assert_eq!(painted, vec![18, 19, 20, 21]);
    }

    #[test]
    fn background_change_repaints_under_existing_strokes() {
        let mut canvas = canvas();
        canvas.begin_stroke(10, 10);
        canvas.end_stroke();

        let navy = Color::rgb(0x10, 0x20, 0x40);
        canvas
            .set_brush(BrushSettings {
                background_color: navy,
                stroke_color: Color::rgb(0xFF, 0, 0),
                ..BrushSettings::default()
            })
            .expect("brush");

        assert_eq!(pixel_at(&canvas, 0, 0), navy.to_rgba());
        assert_eq!(pixel_at(&canvas, 10, 10), [0, 0, 0, 255]);
    }

    #[test]
    fn undo_and_clear_return_to_empty() {
        let mut canvas = canvas();
        canvas.begin_stroke(1, 1);
        canvas.extend_stroke(4, 4);
        canvas.begin_stroke(20, 20);
        canvas.end_stroke();
        assert_eq!(canvas.stroke_count(), 2);

        assert!(canvas.undo());
        assert_eq!(pixel_at(&canvas, 20, 20), [255, 255, 255, 255]);
        assert_eq!(pixel_at(&canvas, 4, 4), [0, 0, 0, 255]);

        canvas.clear();
        assert_eq!(canvas.snapshot(), CanvasSnapshot::Empty);
        assert!(!canvas.undo());
    }

    #[test]
    fn off_canvas_points_are_clipped() {
        let mut canvas = canvas();
        canvas.begin_stroke(-50, -50);
        canvas.extend_stroke(100, 100);
        canvas.end_stroke();

        assert_eq!(pixel_at(&canvas, 15, 15), [0, 0, 0, 255]);
        assert_eq!(canvas.stroke_count(), 1);
    }

    #[test]
    fn rejects_invalid_brush_and_zero_size() {
        let mut canvas = canvas();
        let result = canvas.set_brush(BrushSettings {
            stroke_width: 0,
            ..BrushSettings::default()
        });
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::StrokeWidthOutOfRange(0)))
        ));
        assert!(RasterCanvas::new(0, 10, BrushSettings::default()).is_err());
    }
}
