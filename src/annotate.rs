// Annotation client: uploads an image and reads back the recognised text.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::credentials::CredentialStore;
use crate::endpoints::{self, ANNOTATIONS_PATH};
use crate::error::ServiceError;
use crate::transport::{HttpRequest, MultipartFile, RequestBody, Transport};

/// Status the service answers with when an annotation was created.
const CREATED: u16 = 201;

/// Text recognised in an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationResult {
    pub recognized_text: String,
    /// Relative path of the stored image. Only set when the server kept it.
    pub stored_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnnotationBody {
    text: Option<String>,
    image: Option<String>,
}

pub struct AnnotationClient {
    transport: Arc<dyn Transport>,
    store: Arc<CredentialStore>,
}

impl AnnotationClient {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<CredentialStore>) -> Self {
        Self { transport, store }
    }

    /// Upload JPEG bytes for annotation.
    ///
    /// The image must already be oriented and encoded by the caller (see
    /// `preprocess::prepare_jpeg`). The currently stored token is sent as is;
    /// this call never fetches a token on its own. With `store` false the
    /// server is asked not to keep the image.
    pub async fn annotate(
        &self,
        image: Vec<u8>,
        store: bool,
    ) -> Result<AnnotationResult, ServiceError> {
        if self.store.credentials().is_none() {
            tracing::warn!("Client credentials were not provided");
            return Err(ServiceError::AuthMissing);
        }
        if image.is_empty() {
            return Err(ServiceError::EncodingFailure("image data is empty".to_string()));
        }

        let request = HttpRequest {
            url: annotation_url(store),
            headers: vec![(
                "Authorization".to_string(),
                format!("Bearer {}", self.store.access_token()),
            )],
            body: RequestBody::Multipart(MultipartFile {
                field: "image".to_string(),
                file_name: "file.jpg".to_string(),
                mime: "image/jpeg".to_string(),
                bytes: image,
            }),
        };

        let response = self.transport.post(request).await?;
        if response.status != CREATED {
            tracing::warn!("Image upload failed with response status {}", response.status);
            return Err(ServiceError::HttpStatus(response.status));
        }

        let body: AnnotationBody = serde_json::from_slice(&response.body).map_err(|e| {
            tracing::warn!("Malformed annotation response: {}", e);
            ServiceError::MalformedResponse
        })?;
        let text = body.text.ok_or_else(|| {
            tracing::warn!("Annotation response has no text field");
            ServiceError::MalformedResponse
        })?;

        tracing::debug!(stored = body.image.is_some(), "Recognised text: {}", text);
        Ok(AnnotationResult {
            recognized_text: text,
            stored_image_url: body.image,
        })
    }
}

fn annotation_url(store: bool) -> String {
    let mut url = endpoints::url(ANNOTATIONS_PATH);
    if !store {
        url.push_str("?store=false");
    }
    url
}
