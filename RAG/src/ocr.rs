use image::ImageOutputFormat;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Cursor;

use crate::error::{AssistError, AssistResult};

/// Anything that can read text out of an image. Implementations block; the
/// query service runs them on the blocking pool and normalizes what they
/// return with [`finish_extraction`].
pub trait TextExtractor: Send + Sync {
    fn extract(&self, image: &[u8]) -> AssistResult<String>;
}

/// Decode whatever the user uploaded and hand the OCR engine a grayscale PNG.
pub fn prepare_image(bytes: &[u8]) -> AssistResult<Vec<u8>> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| AssistError::ExtractionFailed(format!("unreadable image: {}", e)))?;

    let mut png = Vec::new();
    decoded
        .grayscale()
        .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
        .map_err(|e| AssistError::ExtractionFailed(format!("could not re-encode image: {}", e)))?;

    Ok(png)
}

static INLINE_WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\x0B\f\r]+").expect("inline whitespace pattern is valid"));

/// Collapse runs of spaces/tabs, drop blank lines, trim.
pub fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(|line| INLINE_WHITESPACE_RE.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize engine output; nothing left means extraction failed.
pub fn finish_extraction(raw: &str) -> AssistResult<String> {
    let text = normalize_text(raw);
    if text.is_empty() {
        return Err(AssistError::ExtractionFailed(
            "no text was recognized in the image".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(feature = "tesseract")]
pub use self::tesseract_backend::TesseractExtractor;

#[cfg(feature = "tesseract")]
mod tesseract_backend {
    use tesseract::Tesseract;

    use super::{prepare_image, TextExtractor};
    use crate::error::{AssistError, AssistResult};

    pub struct TesseractExtractor {
        datapath: Option<String>,
        language: String,
    }

    impl TesseractExtractor {
        /// Fails early if the language data cannot be loaded.
        pub fn new(datapath: Option<String>, language: impl Into<String>) -> anyhow::Result<Self> {
            let language = language.into();
            Tesseract::new(datapath.as_deref(), Some(&language)).map_err(|e| {
                anyhow::anyhow!("failed to initialise tesseract ({}): {}", language, e)
            })?;

            log::info!("Tesseract ready (language: {})", language);
            Ok(Self { datapath, language })
        }
    }

    impl TextExtractor for TesseractExtractor {
        fn extract(&self, image: &[u8]) -> AssistResult<String> {
            let png = prepare_image(image)?;

            let mut engine = Tesseract::new(self.datapath.as_deref(), Some(&self.language))
                .map_err(|e| AssistError::ExtractionFailed(e.to_string()))?
                .set_image_from_mem(&png)
                .map_err(|e| AssistError::ExtractionFailed(e.to_string()))?;

            engine
                .get_text()
                .map_err(|e| AssistError::ExtractionFailed(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn encoded(format: ImageOutputFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 4, image::Rgb([200, 30, 30])));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), format).unwrap();
        out
    }

    #[test]
    fn prepares_jpeg_as_grayscale_png() {
        let png = prepare_image(&encoded(ImageOutputFormat::Jpeg(90))).unwrap();
        let back = image::load_from_memory(&png).unwrap();
        assert_eq!((back.width(), back.height()), (8, 4));
        assert!(matches!(back, DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn rejects_bytes_that_are_not_an_image() {
        let err = prepare_image(b"%PDF-1.7 not an image").unwrap_err();
        assert_eq!(err.code(), "EXTRACTION_FAILED");
    }

    #[test]
    fn normalizes_ocr_noise() {
        let raw = "  Total:\t\t$42.00  \n\n \r\nThank   you\n";
        assert_eq!(normalize_text(raw), "Total: $42.00\nThank you");
    }

    #[test]
    fn inline_whitespace_pattern_is_shared_across_calls() {
        Lazy::force(&INLINE_WHITESPACE_RE);
        for _ in 0..3 {
            assert_eq!(normalize_text("a\x0B\x0Cb\r\n c \t d"), "a b\nc d");
        }
        assert!(std::ptr::eq(
            Lazy::force(&INLINE_WHITESPACE_RE),
            Lazy::force(&INLINE_WHITESPACE_RE)
        ));
    }

    #[test]
    fn whitespace_only_output_is_a_failure() {
        assert!(finish_extraction(" \n\t\n").is_err());
        assert_eq!(finish_extraction("Paid\n").unwrap(), "Paid");
    }
}
