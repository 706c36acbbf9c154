//! Testing utilities and mock implementations.
//!
//! This module provides a replaying search transport and an in-memory
//! catalog store, allowing full searches to run without network or disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shelf_core::testing::{fixtures, MemoryCatalogStore, MockTransport};
//!
//! let transport = MockTransport::new();
//! transport.set_default_files(vec![fixtures::candidate("a1", "Silo.S01E01.mkv")]).await;
//! let store = Arc::new(MemoryCatalogStore::new());
//! ```

mod memory_store;
mod mock_transport;

pub use memory_store::MemoryCatalogStore;
pub use mock_transport::{MockTransport, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use quick_xml::escape::escape;

    use crate::searcher::CandidateFile;

    /// A candidate with a nominal 1 GiB size.
    pub fn candidate(ident: &str, name: &str) -> CandidateFile {
        CandidateFile::new(ident, name).with_size((1u64 << 30).to_string())
    }

    /// A candidate with an explicit size in bytes.
    pub fn sized_candidate(ident: &str, name: &str, size: u64) -> CandidateFile {
        CandidateFile::new(ident, name).with_size(size.to_string())
    }

    /// Render files as an `OK` search response body.
    pub fn search_response_xml(files: &[CandidateFile], total: Option<u64>) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<response>");
        xml.push_str("<status>OK</status>");
        if let Some(total) = total {
            xml.push_str(&format!("<total>{}</total>", total));
        }
        for file in files {
            xml.push_str("<file>");
            push_element(&mut xml, "ident", &file.ident);
            push_element(&mut xml, "name", &file.name);
            if let Some(size) = &file.size {
                push_element(&mut xml, "size", size);
            }
            for (key, value) in &file.extra {
                push_element(&mut xml, key, value);
            }
            xml.push_str("</file>");
        }
        xml.push_str("</response>");
        xml
    }

    /// An error response with the given status and message.
    pub fn error_response_xml(status: &str, message: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<response><status>{}</status><message>{}</message></response>",
            escape(status),
            escape(message)
        )
    }

    fn push_element(xml: &mut String, tag: &str, value: &str) {
        xml.push_str(&format!("<{tag}>{}</{tag}>", escape(value)));
    }
}
