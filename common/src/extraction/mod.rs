//! Contract with the document-extraction webhook.
//!
//! The transport (`Extractor`) only moves bytes: it uploads the document and
//! hands back the raw success body. Turning that body into records is done
//! here by [`normalize_response`], so every transport shares the same rules.

mod normalize;

pub use normalize::normalize_response;

use crate::error::FormError;
use crate::model::record::Record;
use crate::model::upload::SelectedFile;

/// Multipart field carrying the document.
pub const UPLOAD_FIELD: &str = "fichier";

/// Key under which the webhook may wrap each record.
pub const WRAPPER_KEY: &str = "json";

/// Content type sent when the picker reported none.
pub const DEFAULT_MIME: &str = "application/pdf";

/// MIME type to declare for the uploaded part.
pub fn upload_mime(file: &SelectedFile) -> &str {
    match file.mime.trim() {
        "" => DEFAULT_MIME,
        mime => mime,
    }
}

/// Maps the webhook's answer: the body on a 2xx status,
/// `FormError::ExtractionStatus` otherwise.
pub fn check_status(status: u16, body: String) -> Result<String, FormError> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(FormError::ExtractionStatus { status })
    }
}

/// Uploads a document to the extraction service.
///
/// Implementations return the response body on a 2xx status,
/// `FormError::ExtractionStatus` on any other status, and
/// `FormError::Network` when no response was received.
#[allow(async_fn_in_trait)]
pub trait Extractor {
    async fn send(&self, file: &SelectedFile) -> Result<String, FormError>;
}

/// Uploads `file` and normalizes the answer into an edit buffer.
pub async fn fetch_records<E: Extractor + ?Sized>(
    extractor: &E,
    file: &SelectedFile,
) -> Result<Vec<Record>, FormError> {
    let body = extractor.send(file).await?;
    normalize_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn success_statuses_hand_back_the_body() {
        assert_eq!(check_status(200, "{}".into()), Ok("{}".to_string()));
        assert_eq!(check_status(204, String::new()), Ok(String::new()));
    }

    #[test]
    fn other_statuses_are_extraction_errors() {
        for status in [199, 301, 404, 500, 502] {
            let err = check_status(status, "boom".into()).unwrap_err();
            assert_eq!(err, FormError::ExtractionStatus { status });
            assert_eq!(err.kind(), ErrorKind::Extraction);
        }
    }

    #[test]
    fn missing_mime_falls_back_to_pdf() {
        let blank = SelectedFile::new("cin.pdf", " ", b"%PDF".to_vec());
        let png = SelectedFile::new("cin.png", "image/png", b"png".to_vec());
        assert_eq!(upload_mime(&blank), "application/pdf");
        assert_eq!(upload_mime(&png), "image/png");
        assert_eq!(UPLOAD_FIELD, "fichier");
    }
}
