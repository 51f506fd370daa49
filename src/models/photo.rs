use bytes::Bytes;

/// A profile photo received from the client.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl PhotoUpload {
    pub fn new(file_name: Option<&str>, content_type: Option<&str>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.map(str::to_string),
            content_type: content_type.map(str::to_string),
            bytes: bytes.into(),
        }
    }

    /// File extension for the object key: file name first, then content type, then `jpg`.
    pub fn extension(&self) -> String {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        if let Some(ext) = from_name {
            return ext;
        }

        let from_type = match self.content_type.as_deref() {
            Some("image/png") => Some("png"),
            Some("image/webp") => Some("webp"),
            Some("image/gif") => Some("gif"),
            Some("image/jpeg") | Some("image/jpg") => Some("jpg"),
            _ => None,
        };

        from_type.unwrap_or("jpg").to_string()
    }
}
