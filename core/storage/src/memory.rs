//! In-memory Drive gateway for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use drivegate_common::{Error, FileId, FolderId, Result};

use crate::credential::Credential;
use crate::provider::{DriveFile, DriveGateway, GatewayConnector, GOOGLE_DOC_MIME_TYPE};
use crate::query;

/// In-memory file entry.
#[derive(Debug, Clone)]
struct Entry {
    metadata: DriveFile,
    content: Vec<u8>,
}

/// Snapshot of how often each gateway operation ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatewayCalls {
    pub list: usize,
    pub search: usize,
    pub metadata: usize,
    pub download: usize,
    pub export: usize,
}

impl GatewayCalls {
    /// Total number of remote calls.
    pub fn total(&self) -> usize {
        self.list + self.search + self.metadata + self.download + self.export
    }

    /// Number of content (download or export) calls.
    pub fn content(&self) -> usize {
        self.download + self.export
    }
}

#[derive(Debug, Default)]
struct Counters {
    list: AtomicUsize,
    search: AtomicUsize,
    metadata: AtomicUsize,
    download: AtomicUsize,
    export: AtomicUsize,
}

/// In-memory Drive gateway.
///
/// Files are keyed by id. Every operation is counted so tests can assert
/// that no remote call happened.
pub struct MemoryGateway {
    files: RwLock<HashMap<String, Entry>>,
    counters: Counters,
    last_query: Mutex<Option<String>>,
}

impl MemoryGateway {
    /// Create a new empty gateway.
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            counters: Counters::default(),
            last_query: Mutex::new(None),
        }
    }

    /// Store a file. For native documents, `content` is what an export
    /// returns; for everything else it is the downloaded media.
    pub fn insert(&self, metadata: DriveFile, content: impl Into<Vec<u8>>) {
        let entry = Entry {
            metadata,
            content: content.into(),
        };
        self.files
            .write()
            .unwrap()
            .insert(entry.metadata.id.clone(), entry);
    }

    /// Get call counts.
    pub fn calls(&self) -> GatewayCalls {
        GatewayCalls {
            list: self.counters.list.load(Ordering::SeqCst),
            search: self.counters.search.load(Ordering::SeqCst),
            metadata: self.counters.metadata.load(Ordering::SeqCst),
            download: self.counters.download.load(Ordering::SeqCst),
            export: self.counters.export.load(Ordering::SeqCst),
        }
    }

    /// The last Drive `q` expression a list or search would have sent.
    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }

    fn record_query(&self, q: String) {
        *self.last_query.lock().unwrap() = Some(q);
    }

    fn entry(&self, file_id: &FileId) -> Result<Entry> {
        self.files
            .read()
            .unwrap()
            .get(file_id.as_str())
            .cloned()
            .ok_or_else(|| Error::NotFound("File not found".to_string()))
    }

    fn page<F>(&self, page_size: u32, mut keep: F) -> Vec<DriveFile>
    where
        F: FnMut(&DriveFile) -> bool,
    {
        let files = self.files.read().unwrap();
        let mut matching: Vec<DriveFile> = files
            .values()
            .map(|e| e.metadata.clone())
            .filter(|m| keep(m))
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        matching.truncate(query::clamp_page_size(page_size) as usize);
        matching
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriveGateway for MemoryGateway {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_files(&self, folder_id: &FolderId, page_size: u32) -> Result<Vec<DriveFile>> {
        self.counters.list.fetch_add(1, Ordering::SeqCst);
        self.record_query(query::in_folder(folder_id.as_str()));
        Ok(self.page(page_size, |m| m.has_parent(folder_id)))
    }

    async fn search_files(
        &self,
        folder_id: &FolderId,
        search: &str,
        page_size: u32,
    ) -> Result<Vec<DriveFile>> {
        self.counters.search.fetch_add(1, Ordering::SeqCst);
        self.record_query(query::name_contains_in_folder(folder_id.as_str(), search));

        let needle = search.to_lowercase();
        Ok(self.page(page_size, |m| {
            m.has_parent(folder_id) && m.name.to_lowercase().contains(&needle)
        }))
    }

    async fn get_metadata(&self, file_id: &FileId) -> Result<DriveFile> {
        self.counters.metadata.fetch_add(1, Ordering::SeqCst);
        Ok(self.entry(file_id)?.metadata)
    }

    async fn download(&self, file_id: &FileId) -> Result<Vec<u8>> {
        self.counters.download.fetch_add(1, Ordering::SeqCst);
        let entry = self.entry(file_id)?;
        if entry.metadata.mime_type.starts_with("application/vnd.google-apps.") {
            return Err(Error::Gateway(
                "Only files with binary content can be downloaded".to_string(),
            ));
        }
        Ok(entry.content)
    }

    async fn export_text(&self, file_id: &FileId) -> Result<Vec<u8>> {
        self.counters.export.fetch_add(1, Ordering::SeqCst);
        let entry = self.entry(file_id)?;
        if entry.metadata.mime_type != GOOGLE_DOC_MIME_TYPE {
            return Err(Error::Gateway(
                "Export only supports Docs Editors files".to_string(),
            ));
        }
        Ok(entry.content)
    }
}

/// Connector that hands out one shared [`MemoryGateway`].
pub struct MemoryConnector {
    gateway: Arc<MemoryGateway>,
    connects: AtomicUsize,
    last_credential: Mutex<Option<&'static str>>,
}

impl MemoryConnector {
    /// Create a connector around `gateway`.
    pub fn new(gateway: Arc<MemoryGateway>) -> Self {
        Self {
            gateway,
            connects: AtomicUsize::new(0),
            last_credential: Mutex::new(None),
        }
    }

    /// The shared gateway.
    pub fn gateway(&self) -> &Arc<MemoryGateway> {
        &self.gateway
    }

    /// How many times a credential was bound.
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Kind of the last credential bound (see [`Credential::kind`]).
    pub fn last_credential(&self) -> Option<&'static str> {
        *self.last_credential.lock().unwrap()
    }
}

impl GatewayConnector for MemoryConnector {
    fn connect(&self, credential: Credential) -> Result<Arc<dyn DriveGateway>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        *self.last_credential.lock().unwrap() = Some(credential.kind());
        Ok(self.gateway.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::PDF_MIME_TYPE;

    fn file(id: &str, name: &str, mime: &str, parent: &str) -> DriveFile {
        DriveFile {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: mime.to_string(),
            modified_time: None,
            parents: vec![parent.to_string()],
            size: None,
            owners: vec![],
        }
    }

    fn folder(id: &str) -> FolderId {
        FolderId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_paged() {
        let gateway = MemoryGateway::new();
        for i in 0..5 {
            gateway.insert(file(&format!("f{i}"), &format!("doc {i}"), PDF_MIME_TYPE, "a"), "x");
        }
        gateway.insert(file("other", "other", PDF_MIME_TYPE, "b"), "x");

        let page = gateway.list_files(&folder("a"), 3).await.unwrap();
        assert_eq!(page.len(), 3);
        assert!(page.iter().all(|f| f.parents == vec!["a".to_string()]));
        assert_eq!(gateway.calls().list, 1);
    }

    #[tokio::test]
    async fn test_search_records_query() {
        let gateway = MemoryGateway::new();
        gateway.insert(file("1", "Quarterly Report", PDF_MIME_TYPE, "a"), "x");
        gateway.insert(file("2", "Notes", PDF_MIME_TYPE, "a"), "x");

        let hits = gateway.search_files(&folder("a"), "report", 25).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
        assert_eq!(
            gateway.last_query().unwrap(),
            "name contains 'report' and 'a' in parents"
        );
    }

    #[tokio::test]
    async fn test_missing_file_not_found() {
        let gateway = MemoryGateway::new();
        let err = gateway
            .get_metadata(&FileId::new("nope").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(gateway.calls().metadata, 1);
    }

    #[tokio::test]
    async fn test_export_requires_native_document() {
        let gateway = MemoryGateway::new();
        gateway.insert(file("p", "a.pdf", PDF_MIME_TYPE, "a"), "%PDF-");
        gateway.insert(file("d", "doc", GOOGLE_DOC_MIME_TYPE, "a"), "hello");

        let id = FileId::new("p").unwrap();
        assert!(gateway.export_text(&id).await.is_err());
        assert_eq!(gateway.download(&id).await.unwrap(), b"%PDF-");

        let id = FileId::new("d").unwrap();
        assert!(gateway.download(&id).await.is_err());
        assert_eq!(gateway.export_text(&id).await.unwrap(), b"hello");
        assert_eq!(gateway.calls().content(), 4);
    }

    #[test]
    fn test_connector_counts_connects() {
        use oauth2::AccessToken;

        let connector = MemoryConnector::new(Arc::new(MemoryGateway::new()));
        assert_eq!(connector.connects(), 0);
        connector
            .connect(Credential::Bearer(AccessToken::new("t".to_string())))
            .unwrap();
        assert_eq!(connector.connects(), 1);
        assert_eq!(connector.last_credential(), Some("bearer"));
        assert_eq!(connector.gateway().calls().total(), 0);
    }
}
