//! File attachments for log messages and their multipart encoding

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};

use rp_shared::LogLevel;

use crate::error::{ReportError, ReportResult};
use crate::types::{FileInfo, FormPart, LogWithFileRequest};

/// Name of the part carrying the log entry metadata
pub const JSON_PART_NAME: &str = "json_request_part";
/// Name of the part carrying the file bytes
pub const FILE_PART_NAME: &str = "file";

/// A named binary payload attached to one log message
///
/// The data stream is read to the end exactly once when the log is sent.
pub struct Attachment {
    pub name: String,
    pub data: Box<dyn AsyncRead + Send + Unpin>,
    pub mime_type: String,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        data: impl AsyncRead + Send + Unpin + 'static,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data: Box::new(data),
            mime_type: mime_type.into(),
        }
    }

    /// Attachment over an in-memory buffer
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self::new(name, Cursor::new(bytes.into()), mime_type)
    }

    /// Attachment streamed from a file, named after the file
    pub async fn from_path(path: impl AsRef<Path>, mime_type: impl Into<String>) -> ReportResult<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, file, mime_type))
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

/// Build the two parts of a log-with-file request
///
/// The first part is a JSON array holding a single log entry; the service
/// rejects a bare object. The second part carries the file bytes.
pub(crate) async fn encode_log_parts(
    item_id: &str,
    message: &str,
    level: LogLevel,
    time: i64,
    attachment: Attachment,
) -> ReportResult<Vec<FormPart>> {
    let Attachment {
        name,
        mut data,
        mime_type,
    } = attachment;

    let entry = [LogWithFileRequest {
        file: FileInfo { name: &name },
        item_id,
        level,
        message,
        time,
    }];
    let json = serde_json::to_vec(&entry).map_err(|e| ReportError::Serialization {
        context: format!("log entry for attachment {name}"),
        message: e.to_string(),
    })?;

    let mut bytes = Vec::new();
    data.read_to_end(&mut bytes)
        .await
        .map_err(|e| ReportError::Attachment {
            name: name.clone(),
            message: e.to_string(),
        })?;

    Ok(vec![
        FormPart {
            name: JSON_PART_NAME.to_string(),
            file_name: None,
            content_type: "application/json".to_string(),
            data: json,
        },
        FormPart {
            name: FILE_PART_NAME.to_string(),
            file_name: Some(name),
            content_type: mime_type,
            data: bytes,
        },
    ])
}
