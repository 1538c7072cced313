use std::{
    fmt,
    path::{
        Path,
        PathBuf,
    },
    sync::Arc,
};

use serde::{
    ser::SerializeMap,
    Deserialize,
    Serialize,
    Serializer,
};

use crate::core::AnalyzerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Json, OutputFormat::Xml];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Xml => "application/xml",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Json => "JSON",
            OutputFormat::Xml => "XML",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsonantEntry {
    pub letter: String,
    pub count: u64,
}

/// Letter counts in first-seen order. Serializes as a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsonantCounts {
    entries: Vec<ConsonantEntry>,
}

impl ConsonantCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-inserting a letter overwrites its count but keeps its position.
    pub fn insert(&mut self, letter: impl Into<String>, count: u64) {
        let letter = letter.into();
        match self.entries.iter_mut().find(|entry| entry.letter == letter) {
            Some(entry) => entry.count = count,
            None => self.entries.push(ConsonantEntry { letter, count }),
        }
    }

    pub fn get(&self, letter: &str) -> Option<u64> {
        self.entries.iter().find(|entry| entry.letter == letter).map(|entry| entry.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConsonantEntry> {
        self.entries.iter()
    }
}

impl<L: Into<String>> FromIterator<(L, u64)> for ConsonantCounts {
    fn from_iter<I: IntoIterator<Item = (L, u64)>>(iter: I) -> Self {
        let mut counts = ConsonantCounts::new();
        for (letter, count) in iter {
            counts.insert(letter, count);
        }
        counts
    }
}

impl Serialize for ConsonantCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.letter, &entry.count)?;
        }
        map.end()
    }
}

/// Format-agnostic analysis output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalResult {
    pub slow_bike_count: u64,
    pub consonant_counts: ConsonantCounts,
}

/// Server payload as received, tagged by the format that was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    Json(serde_json::Value),
    Xml(String),
}

impl RawResponse {
    pub fn format(&self) -> OutputFormat {
        match self {
            RawResponse::Json(_) => OutputFormat::Json,
            RawResponse::Xml(_) => OutputFormat::Xml,
        }
    }
}

/// What the session keeps after a successful analysis: the canonical record
/// plus the raw payload it came from, so XML can be exported verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub canonical: CanonicalResult,
    pub raw: RawResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// A user-chosen text file, not yet read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub source: FileSource,
}

impl FileHandle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = Path::new(&path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("Unknown file")
            .to_string();

        Self { name, source: FileSource::Path(path) }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { name: name.into(), source: FileSource::Bytes(bytes.into()) }
    }

    pub fn is_empty(&self) -> bool {
        if self.name.is_empty() {
            return true;
        }
        match &self.source {
            FileSource::Path(path) => path.as_os_str().is_empty(),
            FileSource::Bytes(_) => false,
        }
    }

    pub async fn read_text(&self) -> Result<String, AnalyzerError> {
        let bytes = match &self.source {
            FileSource::Path(path) => tokio::fs::read(path).await?,
            FileSource::Bytes(bytes) => bytes.to_vec(),
        };

        String::from_utf8(bytes)
            .map_err(|e| AnalyzerError::FileEncoding(format!("{}: {}", self.name, e)))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_consonant_counts_keep_first_seen_order() {
        let mut counts = ConsonantCounts::new();
        counts.insert("t", 1);
        counts.insert("h", 1);
        counts.insert("q", 1);
        counts.insert("t", 4);

        let letters: Vec<&str> = counts.iter().map(|e| e.letter.as_str()).collect();
        assert_eq!(letters, vec!["t", "h", "q"]);
        assert_eq!(counts.get("t"), Some(4));
        assert_eq!(counts.get("z"), None);
    }

    #[test]
    fn test_canonical_result_serializes_camel_case_ordered() {
        let result = CanonicalResult {
            slow_bike_count: 2,
            consonant_counts: [("t", 1), ("h", 2)].into_iter().collect(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"slowBikeCount":2,"consonantCounts":{"t":1,"h":2}}"#);
    }

    #[test]
    fn test_output_format_metadata() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
        assert_eq!(OutputFormat::Xml.mime_type(), "application/xml");
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(serde_json::to_string(&OutputFormat::Xml).unwrap(), r#""xml""#);
    }

    #[test]
    fn test_file_handle_from_path() {
        let handle = FileHandle::from_path("/tmp/input/story.txt");
        assert_eq!(handle.name, "story.txt");
        assert!(!handle.is_empty());

        assert!(FileHandle::from_path("").is_empty());
        assert!(FileHandle::from_bytes("", b"abc".to_vec()).is_empty());
    }

    #[tokio::test]
    async fn test_read_text_from_path_and_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "The quick brown fox").unwrap();

        let handle = FileHandle::from_path(file.path());
        assert_eq!(handle.read_text().await.unwrap(), "The quick brown fox");

        let dropped = FileHandle::from_bytes("dropped.txt", b"hello".to_vec());
        assert_eq!(dropped.read_text().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_read_text_rejects_invalid_utf8() {
        let handle = FileHandle::from_bytes("binary.bin", vec![0xff, 0xfe, 0x00]);
        let err = handle.read_text().await.unwrap_err();
        assert!(matches!(err, AnalyzerError::FileEncoding(_)));
    }
}
