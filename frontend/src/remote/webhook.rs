use common::error::FormError;
use common::extraction::{check_status, upload_mime, Extractor, UPLOAD_FIELD};
use common::model::upload::SelectedFile;
use gloo_net::http::Request;
use web_sys::FormData;

/// Posts the document as `multipart/form-data` to the extraction webhook.
pub struct WebhookExtractor {
    url: String,
}

impl WebhookExtractor {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

impl Extractor for WebhookExtractor {
    async fn send(&self, file: &SelectedFile) -> Result<String, FormError> {
        let blob = gloo_file::Blob::new_with_options(file.bytes.as_slice(), Some(upload_mime(file)));

        let form = FormData::new().map_err(|e| FormError::Network(format!("{e:?}")))?;
        form.append_with_blob_and_filename(UPLOAD_FIELD, &web_sys::Blob::from(blob), &file.name)
            .map_err(|e| FormError::Network(format!("{e:?}")))?;

        let response = Request::post(&self.url)
            .body(form)
            .map_err(|e| FormError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| FormError::Network(e.to_string()))?;

        // Read the body either way so the connection is released.
        let body = response
            .text()
            .await
            .map_err(|e| FormError::Network(e.to_string()))?;
        let status = response.status();
        if !response.ok() {
            gloo_console::error!(format!("extraction webhook answered {status}: {body}"));
        }
        check_status(status, body)
    }
}
