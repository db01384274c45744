use crate::{Color, DomainError};

pub const CANVAS_WIDTH: u32 = 450;
pub const CANVAS_HEIGHT: u32 = 350;
pub const RGBA_CHANNELS: u8 = 4;

pub const MIN_STROKE_WIDTH: u32 = 1;
pub const MAX_STROKE_WIDTH: u32 = 30;
pub const DEFAULT_STROKE_WIDTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSettings {
    pub stroke_width: u32,
    pub stroke_color: Color,
    pub background_color: Color,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_color: Color::BLACK,
            background_color: Color::WHITE,
        }
    }
}

impl BrushSettings {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH).contains(&self.stroke_width) {
            return Err(DomainError::StrokeWidthOutOfRange(self.stroke_width));
        }
        Ok(())
    }
}

/// Row-major snapshot of a drawing surface, 8 bits per sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        samples: Vec<u8>,
    ) -> Result<Self, DomainError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(usize::from(channels)))
            .unwrap_or(usize::MAX);
        if samples.len() != expected {
            return Err(DomainError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    pub fn from_rgba(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, DomainError> {
        Self::new(width, height, RGBA_CHANNELS, samples)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasSnapshot {
    Empty,
    Drawn(PixelBuffer),
}

impl CanvasSnapshot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
