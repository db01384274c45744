use sketchboard_domain::{AnalysisRequest, EncodedImage};

use crate::ApplicationError;

#[cfg(not(feature = "spanish-prompt"))]
pub const DESCRIBE_INSTRUCTION: &str = "Briefly describe what you see in the image.";

#[cfg(feature = "spanish-prompt")]
pub const DESCRIBE_INSTRUCTION: &str = "Describe brevemente en español lo que ves en la imagen.";

pub fn build_analysis_request(image: &EncodedImage) -> Result<AnalysisRequest, ApplicationError> {
    Ok(AnalysisRequest::new(DESCRIBE_INSTRUCTION, image)?)
}

#[cfg(test)]
mod tests {
    use sketchboard_domain::DomainError;

    use super::*;

    #[test]
    fn request_pairs_fixed_instruction_with_data_uri() {
        let request =
            build_analysis_request(&EncodedImage::new("AAAA")).expect("request should build");
        assert_eq!(request.instruction(), DESCRIBE_INSTRUCTION);
        assert_eq!(request.image_data_uri(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn empty_image_is_rejected() {
        let result = build_analysis_request(&EncodedImage::new(""));
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::EmptyEncodedImage))
        ));
    }
}
