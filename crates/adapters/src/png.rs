use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder as _};
use sketchboard_application::{ApplicationError, ImageEncoder};
use sketchboard_domain::{EncodedImage, PixelBuffer, RGBA_CHANNELS};

/// Lossless RGBA PNG, then standard base64 without line breaks.
#[derive(Debug, Default)]
pub struct PngBase64Encoder;

impl ImageEncoder for PngBase64Encoder {
    fn encode_png(&self, buffer: &PixelBuffer) -> Result<EncodedImage, ApplicationError> {
        if buffer.area() == 0 {
            return Err(ApplicationError::Encoding(format!(
                "pixel buffer has zero area ({}x{})",
                buffer.width(),
                buffer.height()
            )));
        }
        if buffer.channels() != RGBA_CHANNELS {
            return Err(ApplicationError::Encoding(format!(
                "expected {RGBA_CHANNELS} channels per pixel, got {}",
                buffer.channels()
            )));
        }

        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(
                buffer.samples(),
                buffer.width(),
                buffer.height(),
                ColorType::Rgba8,
            )
            .map_err(|error| ApplicationError::Encoding(error.to_string()))?;

        Ok(EncodedImage::new(STANDARD.encode(&png)))
    }
}

#[cfg(test)]
mod tests {
    use image::ImageFormat;

    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut samples = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&[
                    (x * 7) as u8,
                    (y * 13) as u8,
                    ((x + y) * 3) as u8,
                    ((x * y) % 256) as u8,
                ]);
            }
        }
        PixelBuffer::from_rgba(width, height, samples).expect("gradient")
    }

    #[test]
    fn png_and_base64_round_trip_preserves_samples() {
        let single = PixelBuffer::from_rgba(1, 1, vec![12, 34, 56, 78]).expect("single pixel");
        let transparent = PixelBuffer::from_rgba(6, 5, vec![0; 6 * 5 * 4]).expect("transparent");

        for source in [gradient(37, 21), single, transparent] {
            let encoded = PngBase64Encoder.encode_png(&source).expect("encode");

            assert!(!encoded.as_str().contains('\n'));
            let png = STANDARD.decode(encoded.as_str()).expect("valid base64");
            let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)
                .expect("valid png")
                .to_rgba8();

            assert_eq!(decoded.dimensions(), (source.width(), source.height()));
            assert_eq!(decoded.as_raw().as_slice(), source.samples());
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let source = gradient(8, 8);
        let first = PngBase64Encoder.encode_png(&source).expect("encode");
        let second = PngBase64Encoder.encode_png(&source).expect("encode");
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_zero_area_and_non_rgba_buffers() {
        let empty = PixelBuffer::from_rgba(0, 4, Vec::new()).expect("buffer");
        assert!(matches!(
            PngBase64Encoder.encode_png(&empty),
            Err(ApplicationError::Encoding(_))
        ));

        let rgb = PixelBuffer::new(2, 2, 3, vec![0; 12]).expect("buffer");
        assert!(matches!(
            PngBase64Encoder.encode_png(&rgb),
            Err(ApplicationError::Encoding(message)) if message.contains("got 3")
        ));
    }
}
