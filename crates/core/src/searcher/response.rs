//! Parsing of the search API's XML responses.
//!
//! ```xml
//! <response>
//!   <status>OK</status>
//!   <total>2</total>
//!   <file><ident>a1</ident><name>Silo.S01E01.mkv</name><size>123</size>...</file>
//!   ...
//! </response>
//! ```

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use super::{CandidateFile, SearchPage, TransportError};

const STATUS_OK: &str = "OK";

/// Parse a search response body into a page of candidates.
///
/// A missing or non-`OK` status is reported as [`TransportError::Status`];
/// malformed XML as [`TransportError::Parse`]. File records without an
/// `ident` or `name` are skipped, but still counted in
/// [`SearchPage::records`].
pub fn parse_search_response(body: &str) -> Result<SearchPage, TransportError> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut status: Option<String> = None;
    let mut message: Option<String> = None;
    let mut total: Option<u64> = None;
    let mut record: Option<BTreeMap<String, String>> = None;
    let mut files = Vec::new();
    let mut records = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if path.len() == 1 && tag == "file" {
                    record = Some(BTreeMap::new());
                }
                path.push(tag);
                text.clear();
            }
            Ok(Event::Empty(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if path.len() == 1 && tag == "file" {
                    records += 1;
                    debug!("Skipping empty file record");
                } else if path.len() == 2 && path[1] == "file" {
                    if let Some(fields) = record.as_mut() {
                        fields.insert(tag, String::new());
                    }
                }
            }
            Ok(Event::Text(e)) => {
                let unescaped = e
                    .unescape()
                    .map_err(|e| TransportError::Parse(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(e)) => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(_)) => {
                let tag = path.pop().unwrap_or_default();
                match path.len() {
                    // Direct children of the root element.
                    1 => match tag.as_str() {
                        "status" => status = Some(text.trim().to_string()),
                        "message" => message = Some(text.trim().to_string()),
                        "total" => total = text.trim().parse().ok(),
                        "file" => {
                            records += 1;
                            if let Some(fields) = record.take() {
                                if let Some(file) = candidate_from_fields(fields) {
                                    files.push(file);
                                }
                            }
                        }
                        _ => {}
                    },
                    // Fields of a file record.
                    2 if path[1] == "file" => {
                        if let Some(fields) = record.as_mut() {
                            fields.insert(tag, text.trim().to_string());
                        }
                    }
                    _ => {}
                }
                text.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(TransportError::Parse(format!(
                    "at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    match status.as_deref() {
        Some(STATUS_OK) => Ok(SearchPage {
            files,
            records,
            total,
        }),
        Some(other) => Err(TransportError::Status {
            status: other.to_string(),
            message: message.unwrap_or_default(),
        }),
        None => Err(TransportError::Parse("response has no status".to_string())),
    }
}

fn candidate_from_fields(mut fields: BTreeMap<String, String>) -> Option<CandidateFile> {
    let (Some(ident), Some(name)) = (fields.remove("ident"), fields.remove("name")) else {
        debug!(fields = ?fields.keys().collect::<Vec<_>>(), "Skipping file record without ident/name");
        return None;
    };

    let size = fields.remove("size");
    Some(CandidateFile {
        ident,
        name,
        size,
        extra: fields,
    })
}
