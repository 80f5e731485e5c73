//! Document Builder: flattens a rep record into searchable text.
//!
//! Building is deterministic and pure — the same rep always yields
//! byte-identical content, so the corpus can be rebuilt wholesale on load
//! without churning the index. Large documents are split into fixed-size
//! overlapping character chunks; every chunk keeps the rep metadata so a
//! retrieval hit can always be attributed to its rep.

use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::models::SalesRep;

/// `document_type` value attached to every rep document.
pub const DOCUMENT_TYPE: &str = "sales_rep";

/// Sentinel line rendered when a rep has no deals. Never an empty string —
/// the corpus must say so explicitly.
pub const NO_DEALS_LINE: &str = "No deals available.";
/// See [`NO_DEALS_LINE`].
pub const NO_CLIENTS_LINE: &str = "No clients available.";

/// Metadata attached to a document and carried onto each of its chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMeta {
    pub rep_id: u32,
    pub rep_name: String,
    pub document_type: String,
}

/// A full, unchunked rep document.
#[derive(Debug, Clone, Serialize)]
pub struct RepDocument {
    pub content: String,
    pub meta: DocMeta,
}

/// One indexable chunk of a rep document.
#[derive(Debug, Clone, Serialize)]
pub struct DocChunk {
    pub id: String,
    pub meta: DocMeta,
    pub chunk_index: usize,
    pub text: String,
    pub hash: String,
}

fn format_deals(rep: &SalesRep) -> String {
    if rep.deals.is_empty() {
        return NO_DEALS_LINE.to_string();
    }
    rep.deals
        .iter()
        .map(|d| format!("- Client: {}, Value: {}, Status: {}", d.client, d.value, d.status))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_clients(rep: &SalesRep) -> String {
    if rep.clients.is_empty() {
        return NO_CLIENTS_LINE.to_string();
    }
    rep.clients
        .iter()
        .map(|c| format!("- Name: {}, Industry: {}, Contact: {}", c.name, c.industry, c.contact))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the searchable document for one rep.
pub fn build_document(rep: &SalesRep) -> RepDocument {
    let content = format!(
        "Sales Rep: {}\nRole: {}\nRegion: {}\nSkills: {}\n\nDeals:\n{}\n\nClients:\n{}",
        rep.name,
        rep.role,
        rep.region,
        rep.skills.join(", "),
        format_deals(rep),
        format_clients(rep),
    );

    RepDocument {
        content,
        meta: DocMeta {
            rep_id: rep.id,
            rep_name: rep.name.clone(),
            document_type: DOCUMENT_TYPE.to_string(),
        },
    }
}

/// Split a document into overlapping character windows.
///
/// Consecutive chunks share `chunk_overlap` characters. Always returns at
/// least one chunk, with contiguous indices starting at 0. Window edges land
/// on char boundaries, so multi-byte text never splits mid-character.
///
/// Callers must have validated `chunk_overlap < chunk_size` (the config
/// loader enforces this).
pub fn chunk_document(doc: &RepDocument, chunk_size: usize, chunk_overlap: usize) -> Vec<DocChunk> {
    debug_assert!(chunk_size > 0 && chunk_overlap < chunk_size);

    let text = doc.content.as_str();
    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let n_chars = offsets.len();

    if n_chars <= chunk_size {
        return vec![make_chunk(&doc.meta, 0, text)];
    }

    let step = chunk_size - chunk_overlap;
    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut index = 0usize;

    loop {
        let end = (start + chunk_size).min(n_chars);
        let byte_start = offsets[start];
        let byte_end = if end == n_chars { text.len() } else { offsets[end] };
        chunks.push(make_chunk(&doc.meta, index, &text[byte_start..byte_end]));
        index += 1;

        if end == n_chars {
            break;
        }
        start += step;
    }

    chunks
}

fn make_chunk(meta: &DocMeta, index: usize, text: &str) -> DocChunk {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    DocChunk {
        id: Uuid::new_v4().to_string(),
        meta: meta.clone(),
        chunk_index: index,
        text: text.to_string(),
        hash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Deal};

    fn rep() -> SalesRep {
        SalesRep {
            id: 7,
            name: "Alice".to_string(),
            role: "Senior Rep".to_string(),
            region: "West".to_string(),
            skills: vec!["Negotiation".to_string(), "CRM".to_string()],
            deals: vec![Deal {
                client: "Acme".to_string(),
                value: 1000,
                status: "Closed Won".to_string(),
            }],
            clients: vec![Client {
                name: "Acme".to_string(),
                industry: "Manufacturing".to_string(),
                contact: "jane@acme.com".to_string(),
            }],
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let r = rep();
        assert_eq!(build_document(&r).content, build_document(&r).content);
    }

    #[test]
    fn test_content_layout() {
        let doc = build_document(&rep());
        assert!(doc.content.starts_with("Sales Rep: Alice\n"));
        assert!(doc.content.contains("Skills: Negotiation, CRM"));
        assert!(doc
            .content
            .contains("- Client: Acme, Value: 1000, Status: Closed Won"));
        assert!(doc
            .content
            .contains("- Name: Acme, Industry: Manufacturing, Contact: jane@acme.com"));
        assert_eq!(doc.meta.rep_id, 7);
        assert_eq!(doc.meta.document_type, DOCUMENT_TYPE);
    }

    #[test]
    fn test_empty_lists_render_sentinels() {
        let mut r = rep();
        r.deals.clear();
        r.clients.clear();
        let doc = build_document(&r);
        assert!(doc.content.contains(NO_DEALS_LINE));
        assert!(doc.content.contains(NO_CLIENTS_LINE));
    }

    #[test]
    fn test_small_document_single_chunk() {
        let doc = build_document(&rep());
        let chunks = chunk_document(&doc, 10_000, 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].text, doc.content);
    }

    #[test]
    fn test_chunks_overlap_and_cover() {
        let doc = RepDocument {
            content: "abcdefghijklmnopqrstuvwxyz".to_string(),
            meta: DocMeta {
                rep_id: 1,
                rep_name: "Alice".to_string(),
                document_type: DOCUMENT_TYPE.to_string(),
            },
        };
        let chunks = chunk_document(&doc, 10, 4);
        // step = 6: [0..10), [6..16), [12..22), [18..26)
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].text, "abcdefghij");
        assert_eq!(chunks[1].text, "ghijklmnop");
        assert!(chunks[3].text.ends_with('z'));
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.chunk_index, i);
            assert_eq!(c.meta.rep_id, 1, "chunk must keep rep attribution");
        }
        // Consecutive chunks share exactly the overlap.
        assert_eq!(&chunks[0].text[6..], &chunks[1].text[..4]);
    }

    #[test]
    fn test_chunking_respects_multibyte_chars() {
        let doc = RepDocument {
            content: "日本語のテキストを分割しても壊れない".repeat(3),
            meta: DocMeta {
                rep_id: 2,
                rep_name: "Bob".to_string(),
                document_type: DOCUMENT_TYPE.to_string(),
            },
        };
        let chunks = chunk_document(&doc, 8, 2);
        assert!(chunks.len() > 1);
        let total_chars: usize = doc.content.chars().count();
        let last = chunks.last().unwrap();
        assert!(doc.content.ends_with(&last.text));
        assert!(total_chars > 8);
    }

    #[test]
    fn test_chunk_hash_tracks_text() {
        let doc = build_document(&rep());
        let a = chunk_document(&doc, 10_000, 100);
        let b = chunk_document(&doc, 10_000, 100);
        assert_eq!(a[0].hash, b[0].hash);
        assert_ne!(a[0].id, b[0].id);
    }
}
