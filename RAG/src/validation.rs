use serde::Serialize;
use std::path::Path;

use crate::error::{AssistError, AssistResult};

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

/// Verdict for an upload: `valid`, and when not, a human readable reason.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UploadCheck {
    pub valid: bool,
    pub reason: String,
}

pub fn validate_upload(filename: &str, size: u64) -> UploadCheck {
    match check_upload(filename, size) {
        Ok(()) => UploadCheck {
            valid: true,
            reason: String::new(),
        },
        Err(e) => UploadCheck {
            valid: false,
            reason: e.to_string(),
        },
    }
}

/// Extension first, then size.
pub fn check_upload(filename: &str, size: u64) -> AssistResult<()> {
    let extension = file_extension(filename);
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AssistError::InvalidExtension { extension });
    }

    if size > MAX_IMAGE_SIZE {
        return Err(AssistError::FileTooLarge { size });
    }

    Ok(())
}

fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file_extension("Scan.JPEG"), "jpeg");
        assert_eq!(file_extension("archive.tar.PNG"), "png");
    }

    #[test]
    fn dotfiles_and_bare_names_have_no_extension() {
        assert_eq!(file_extension("receipt"), "");
        assert_eq!(file_extension(".png"), "");
        assert_eq!(file_extension("receipt."), "");
    }
}
