//! Image selection: validation and data-URI encoding of picked files.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::PlaceError;

/// A file handed over by the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Reject anything that is not an image or is larger than `max_bytes`.
pub fn validate_image(file: &ImageFile, max_bytes: u64) -> Result<(), PlaceError> {
    if !file.mime_type.starts_with("image/") {
        tracing::warn!(name = %file.name, mime = %file.mime_type, "rejected non-image file");
        return Err(PlaceError::InvalidInput("אנא בחר קובץ תמונה תקין".into()));
    }
    if file.size() > max_bytes {
        tracing::warn!(
            name = %file.name,
            size = file.size(),
            max_bytes,
            "rejected oversized image"
        );
        return Err(PlaceError::InvalidInput(format!(
            "התמונה גדולה מדי. מקסימום {}MB",
            max_bytes / (1024 * 1024)
        )));
    }
    Ok(())
}

/// `data:<mime>;base64,<payload>` for embedding in the stored record.
pub fn to_data_uri(file: &ImageFile) -> String {
    format!("data:{};base64,{}", file.mime_type, STANDARD.encode(&file.bytes))
}

/// Validate and encode in one step.
pub fn load_image(file: &ImageFile, max_bytes: u64) -> Result<String, PlaceError> {
    validate_image(file, max_bytes)?;
    Ok(to_data_uri(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_IMAGE_BYTES;

    #[test]
    fn encodes_data_uri() {
        let file = ImageFile::new("dot.png", "image/png", vec![0x89, b'P', b'N', b'G']);
        assert_eq!(
            load_image(&file, DEFAULT_MAX_IMAGE_BYTES).unwrap(),
            "data:image/png;base64,iVBORw=="
        );
    }

    #[test]
    fn rejects_non_images() {
        let file = ImageFile::new("notes.txt", "text/plain", b"hi".to_vec());
        let err = load_image(&file, DEFAULT_MAX_IMAGE_BYTES).unwrap_err();
        assert!(matches!(err, PlaceError::InvalidInput(_)));
    }

    #[test]
    fn size_limit_is_inclusive() {
        let at_limit = ImageFile::new("a.jpg", "image/jpeg", vec![0; 5 * 1024 * 1024]);
        assert!(validate_image(&at_limit, DEFAULT_MAX_IMAGE_BYTES).is_ok());

        let over = ImageFile::new("b.jpg", "image/jpeg", vec![0; 6 * 1024 * 1024]);
        let err = validate_image(&over, DEFAULT_MAX_IMAGE_BYTES).unwrap_err();
        assert_eq!(err, PlaceError::InvalidInput("התמונה גדולה מדי. מקסימום 5MB".into()));
    }
}
