use std::path::Path;

use image::io::Reader as ImageReader;
use sketchboard_application::{ApplicationError, CanvasSource};
use sketchboard_domain::{CanvasSnapshot, PixelBuffer};

/// Canvas backed by an image file on disk, for analysing an existing picture.
#[derive(Debug, Clone)]
pub struct ImageFileCanvas {
    buffer: PixelBuffer,
}

impl ImageFileCanvas {
    pub fn open(path: &Path) -> Result<Self, ApplicationError> {
        let image = ImageReader::open(path)
            .map_err(|error| ApplicationError::Io(format!("{}: {error}", path.display())))?
            .with_guessed_format()
            .map_err(|error| ApplicationError::Io(error.to_string()))?
            .decode()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?
            .to_rgba8();

        let (width, height) = image.dimensions();
        let buffer = PixelBuffer::from_rgba(width, height, image.into_raw())?;
        log::debug!("loaded {}x{} image from {}", width, height, path.display());
        Ok(Self { buffer })
    }
}

impl CanvasSource for ImageFileCanvas {
    fn snapshot(&self) -> CanvasSnapshot {
        if self.buffer.area() == 0 {
            return CanvasSnapshot::Empty;
        }
        CanvasSnapshot::Drawn(self.buffer.clone())
    }
}
