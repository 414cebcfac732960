use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::error::{LookupError, Result};
use crate::source::raw::{LexiconMeta, RawEntry};

const DATA_KEY: &str = "_data";
const META_KEY: &str = "_meta";
const INDEX_KEY: &str = "_index";

/// Parsed dictionary resource: entries in document order plus the number of
/// entries that had to be skipped.
#[derive(Debug, Clone, Default)]
pub struct RawLexicon {
    pub meta: Option<LexiconMeta>,
    pub entries: Vec<(String, RawEntry)>,
    pub skipped: usize,
}

impl RawLexicon {
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, RawEntry)>,
        K: Into<String>,
    {
        Self {
            meta: None,
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            skipped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!("reading dictionary resource {}", path.as_ref().display());
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let root: Value = serde_json::from_reader(reader)?;
        Self::from_value(root)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        Self::from_value(root)
    }

    /// Accepts either `{"_meta": .., "_data": {word: entry}}` or a flat
    /// `{word: entry}` object. Entries that do not deserialize are skipped.
    pub fn from_value(root: Value) -> Result<Self> {
        let Value::Object(root) = root else {
            return Err(LookupError::InvalidFormat(
                "dictionary resource must be a JSON object".to_string(),
            ));
        };

        let mut meta_value = None;
        let mut data_value = None;
        let mut flat = Map::new();
        for (key, value) in root {
            match key.as_str() {
                META_KEY => meta_value = Some(value),
                DATA_KEY => data_value = Some(value),
                INDEX_KEY => {}
                _ => {
                    flat.insert(key, value);
                }
            }
        }

        let meta = meta_value.and_then(|value| match serde_json::from_value::<LexiconMeta>(value) {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!("ignoring malformed {} block: {}", META_KEY, e);
                None
            }
        });

        let data = match data_value {
            Some(Value::Object(data)) => data,
            Some(_) => {
                return Err(LookupError::InvalidFormat(format!(
                    "{} must be a JSON object",
                    DATA_KEY
                )))
            }
            None => flat,
        };

        Ok(Self::collect_entries(meta, data))
    }

    fn collect_entries(meta: Option<LexiconMeta>, data: Map<String, Value>) -> Self {
        let mut entries = Vec::with_capacity(data.len());
        let mut skipped = 0usize;

        for (word, value) in data {
            if !value.is_object() {
                warn!("skipping entry {:?}: value is not an object", word);
                skipped += 1;
                continue;
            }
            match serde_json::from_value::<RawEntry>(value) {
                Ok(entry) => entries.push((word, entry)),
                Err(e) => {
                    warn!("skipping entry {:?}: {}", word, e);
                    skipped += 1;
                }
            }
        }

        Self {
            meta,
            entries,
            skipped,
        }
    }
}
