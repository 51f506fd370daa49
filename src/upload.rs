use axum::http::HeaderMap;

use crate::models::PhotoUpload;

pub const PHOTO_FIELD: &str = "photo";

/// Pulls the `photo` field out of a multipart body. `Ok(None)` when the body is not
/// multipart or the field is absent.
pub async fn parse_photo(headers: &HeaderMap, body: bytes::Bytes) -> Result<Option<PhotoUpload>, String> {
    let Some(content_type) = headers.get("content-type").and_then(|v| v.to_str().ok()) else {
        return Ok(None);
    };

    let boundary = match multer::parse_boundary(content_type) {
        Ok(boundary) => boundary,
        Err(multer::Error::NoMultipart) => return Ok(None),
        Err(e) => return Err(format!("Invalid multipart content type: {e}")),
    };

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        if field.name() != Some(PHOTO_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(|m| m.essence_str().to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| format!("Field read error: {e}"))?;

        return Ok(Some(PhotoUpload {
            file_name,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}
