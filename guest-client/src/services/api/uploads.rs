//! # Media Uploads
//!
//! Two steps: ask the backend for a presigned target at
//! `/uploads/generate-url`, then send the file straight to the storage
//! provider. The provider chooses the shape:
//!
//! - `PUT`: raw bytes, with any headers the presign lists.
//! - `POST`: `multipart/form-data` with the presign's `form_data` fields
//!   first and the file last, under `file`.
//!
//! The public URL comes from the provider's answer (`url`, then `filePath`)
//! or from the presign's `public_url`.

use shared::{GenerateUrlRequest, GenerateUrlResponse, MediaRef, UploadMethod, UploadResult};
use uuid::Uuid;

use super::client::ApiClient;
use super::transport::{FormPart, HttpRequest, Method, RequestBody};
use crate::core::error::ApiError;

/// A file ready to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// `video` for `video/*`, `image` for everything else.
pub fn media_type_for(content_type: &str) -> &'static str {
    if content_type.trim().to_ascii_lowercase().starts_with("video/") {
        "video"
    } else {
        "image"
    }
}

#[tracing::instrument(skip(client))]
pub async fn generate_url(client: &ApiClient, request: &GenerateUrlRequest) -> Result<GenerateUrlResponse, ApiError> {
    client.post("/uploads/generate-url", request, true).await
}

fn upload_request(presign: &GenerateUrlResponse, file: &MediaFile) -> HttpRequest {
    match presign.method {
        UploadMethod::Put => {
            let request = HttpRequest::new(Method::PUT, presign.upload_url.clone()).body(RequestBody::Bytes {
                content_type: file.content_type.clone(),
                data: file.data.clone(),
            });
            presign
                .headers
                .iter()
                .flatten()
                .fold(request, |request, (name, value)| request.header(name.clone(), value.clone()))
        }
        UploadMethod::Post => {
            let mut parts: Vec<FormPart> = presign
                .form_data
                .iter()
                .flatten()
                .map(|(name, value)| FormPart::Text {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect();
            parts.push(FormPart::File {
                name: "file".to_string(),
                file_name: file.file_name.clone(),
                content_type: file.content_type.clone(),
                data: file.data.clone(),
            });
            HttpRequest::new(Method::POST, presign.upload_url.clone()).body(RequestBody::Form(parts))
        }
    }
}

fn resolve_public_url(presign: &GenerateUrlResponse, result: Option<UploadResult>) -> Option<String> {
    let non_empty = |s: &String| !s.trim().is_empty();
    let result = result.unwrap_or_default();
    result
        .url
        .filter(non_empty)
        .or_else(|| presign.public_url.clone().filter(non_empty))
        .or_else(|| result.file_path.filter(non_empty))
}

/// Upload `file` and describe it as report media with a fresh id.
#[tracing::instrument(skip(client, file), fields(file_name = %file.file_name, size = file.data.len()))]
pub async fn upload_media(client: &ApiClient, file: &MediaFile) -> Result<MediaRef, ApiError> {
    let presign = generate_url(
        client,
        &GenerateUrlRequest {
            filename: file.file_name.clone(),
            content_type: file.content_type.clone(),
        },
    )
    .await?;
    tracing::debug!(method = ?presign.method, "Upload target issued");

    let response = client.send_external(upload_request(&presign, file)).await?;
    let result = serde_json::from_slice::<UploadResult>(&response.body).ok();

    let url = resolve_public_url(&presign, result)
        .ok_or_else(|| ApiError::decode(response.status, "upload response carried no public URL"))?;

    tracing::info!(%url, "Media uploaded");
    Ok(MediaRef {
        id: Uuid::new_v4().to_string(),
        url,
        media_type: media_type_for(&file.content_type).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn presign(method: UploadMethod) -> GenerateUrlResponse {
        GenerateUrlResponse {
            upload_url: "https://storage.example.com/upload".into(),
            method,
            form_data: None,
            headers: None,
            public_url: None,
        }
    }

    fn photo() -> MediaFile {
        MediaFile::new("room.jpg", "image/jpeg", vec![1, 2, 3])
    }

    #[test]
    fn test_media_type() {
        assert_eq!(media_type_for("video/mp4"), "video");
        assert_eq!(media_type_for("VIDEO/quicktime"), "video");
        assert_eq!(media_type_for("image/png"), "image");
        assert_eq!(media_type_for(""), "image");
    }

    #[test]
    fn test_put_sends_raw_bytes_with_headers() {
        let mut target = presign(UploadMethod::Put);
        target.headers = Some(BTreeMap::from([("x-amz-acl".to_string(), "public-read".to_string())]));

        let request = upload_request(&target, &photo());
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.bearer, None);
        assert_eq!(request.headers, vec![("x-amz-acl".to_string(), "public-read".to_string())]);
        assert!(matches!(request.body, RequestBody::Bytes { ref content_type, .. } if content_type == "image/jpeg"));
    }

    #[test]
    fn test_post_puts_file_after_form_fields() {
        let mut target = presign(UploadMethod::Post);
        target.form_data = Some(BTreeMap::from([
            ("signature".to_string(), "s".to_string()),
            ("token".to_string(), "t".to_string()),
        ]));

        let request = upload_request(&target, &photo());
        let RequestBody::Form(parts) = request.body else {
            panic!("expected multipart body");
        };
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[0], FormPart::Text { name, .. } if name == "signature"));
        assert!(matches!(&parts[2], FormPart::File { name, file_name, .. } if name == "file" && file_name == "room.jpg"));
    }

    #[test]
    fn test_public_url_precedence() {
        let mut target = presign(UploadMethod::Post);
        target.public_url = Some("https://cdn.example.com/presigned.jpg".into());

        let answered = UploadResult {
            url: Some("https://cdn.example.com/answered.jpg".into()),
            file_path: Some("/answered.jpg".into()),
        };
        assert_eq!(
            resolve_public_url(&target, Some(answered)).as_deref(),
            Some("https://cdn.example.com/answered.jpg")
        );
        assert_eq!(
            resolve_public_url(&target, None).as_deref(),
            Some("https://cdn.example.com/presigned.jpg")
        );

        let path_only = UploadResult {
            url: None,
            file_path: Some("/a.jpg".into()),
        };
        assert_eq!(
            resolve_public_url(&presign(UploadMethod::Post), Some(path_only)).as_deref(),
            Some("/a.jpg")
        );
        assert_eq!(resolve_public_url(&presign(UploadMethod::Put), None), None);
    }
}
