//! `/files/` endpoints: stored punch-data files.

use std::future::Future;
use std::future::IntoFuture;
use std::pin::Pin;

use super::FileList;
use super::envelope::single_record;
use crate::AttendanceClient;
use crate::error::ApiError;
use crate::model::Row;

/// File endpoints, bound to a client.
#[derive(Debug, Clone, Copy)]
pub struct FilesApi<'a> {
    client: &'a AttendanceClient,
}

impl AttendanceClient {
    /// File endpoints.
    pub fn files(&self) -> FilesApi<'_> {
        FilesApi { client: self }
    }
}

impl<'a> FilesApi<'a> {
    /// Lists stored files.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let page = client.files().list().limit(50).offset(100).await?;
    /// ```
    pub fn list(&self) -> FileListBuilder<'a> {
        FileListBuilder {
            client: self.client,
            limit: None,
            offset: None,
        }
    }

    /// Metadata of one file.
    pub async fn get(&self, id: u64) -> Result<Row, ApiError> {
        let body = self
            .client
            .get_json(&format!("/files/file/{}/", id), Vec::new())
            .await?;
        single_record(body)
    }

    /// Asks the backend to process a stored file. Returns the response body.
    pub async fn process(&self, id: u64) -> Result<Row, ApiError> {
        let body = self
            .client
            .get_json(&format!("/files/process/{}/", id), Vec::new())
            .await?;
        log::info!("processed file {}", id);
        single_record(body)
    }
}

/// Builder for file listings bound to a client.
pub struct FileListBuilder<'a> {
    client: &'a AttendanceClient,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl FileListBuilder<'_> {
    /// Maximum number of files. Zero means the server default.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of files to skip. Zero is the same as no offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl<'a> IntoFuture for FileListBuilder<'a> {
    type Output = Result<FileList, ApiError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let mut query = Vec::new();
            if let Some(limit) = self.limit.filter(|n| *n > 0) {
                query.push(("limit", limit.to_string()));
            }
            if let Some(offset) = self.offset.filter(|n| *n > 0) {
                query.push(("offset", offset.to_string()));
            }
            let body = self.client.get_json("/files/all/", query).await?;
            Ok(FileList::from_envelope(body))
        })
    }
}
