use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::chunking::Chunk;
use crate::error::ExtractError;

/// Flat document-level metadata attached to every chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    fields: Map<String, Value>,
}

impl DocumentMetadata {
    #[must_use]
    pub fn new(doc_id: impl Into<String>, doc_name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("doc_id".to_string(), Value::String(doc_id.into()));
        fields.insert("doc_name".to_string(), Value::String(doc_name.into()));
        Self { fields }
    }

    #[must_use]
    pub fn extracted_at(self, timestamp: DateTime<Utc>) -> Self {
        self.with(
            "extracted_at",
            timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }

    #[must_use]
    pub fn extracted_now(self) -> Self {
        self.extracted_at(Utc::now())
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Serializes each chunk and merges `metadata` into it; metadata keys win.
pub fn enrich(chunks: &[Chunk], metadata: &Map<String, Value>) -> Result<Vec<Value>, ExtractError> {
    chunks
        .iter()
        .map(|chunk| {
            let mut object = match serde_json::to_value(chunk)? {
                Value::Object(object) => object,
                other => {
                    let mut object = Map::new();
                    object.insert("text".to_string(), other);
                    object
                }
            };
            for (key, value) in metadata {
                object.insert(key.clone(), value.clone());
            }
            Ok(Value::Object(object))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{DocumentMetadata, enrich};
    use crate::chunking::Chunk;

    #[test]
    fn metadata_is_merged_into_every_chunk() {
        let chunks = vec![Chunk {
            chapter: Some("CAPÍTULO I".to_string()),
            text: "Texto".to_string(),
            ..Chunk::default()
        }];
        let timestamp = Utc
            .with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let metadata = DocumentMetadata::new("ppc-cc", "PPC Ciência da Computação")
            .extracted_at(timestamp)
            .with("text", "sobrescrito");

        let enriched = enrich(&chunks, metadata.as_map()).expect("enrich");

        assert_eq!(
            enriched,
            vec![json!({
                "chapter": "CAPÍTULO I",
                "section": null,
                "article": null,
                "text": "sobrescrito",
                "doc_id": "ppc-cc",
                "doc_name": "PPC Ciência da Computação",
                "extracted_at": "2025-03-01T12:00:00Z",
            })]
        );
    }
}
