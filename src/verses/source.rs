use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::verse::Verse;

const USER_AGENT: &str = "verse-sprout/0.1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the verse collection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseSource {
    File(PathBuf),
    Url(String),
}

impl VerseSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for VerseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("expected a JSON array of verses")]
    NotAnArray,
}

/// The collection could not be loaded at all.
#[derive(Debug, Error)]
#[error("could not load verses from {origin}: {reason}")]
pub struct DataLoadFailed {
    pub origin: String,
    #[source]
    pub reason: LoadFailure,
}

/// A single record that was excluded from the collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {index}: {reason}")]
pub struct MalformedRecord {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedVerses {
    pub verses: Vec<Verse>,
    pub rejected: Vec<MalformedRecord>,
}

#[derive(Debug)]
pub enum LoadEvent {
    Loaded(LoadedVerses),
    Failed(DataLoadFailed),
}

/// Decode a verse array, keeping well-formed records in source order and
/// reporting the rest.
pub fn parse_verses(bytes: &[u8]) -> Result<LoadedVerses, LoadFailure> {
    let Value::Array(items) = serde_json::from_slice::<Value>(bytes)? else {
        return Err(LoadFailure::NotAnArray);
    };

    let mut loaded = LoadedVerses::default();
    let mut seen_ids = HashSet::new();

    for (index, item) in items.into_iter().enumerate() {
        let verse = match serde_json::from_value::<Verse>(item) {
            Ok(verse) => verse,
            Err(e) => {
                loaded.rejected.push(MalformedRecord {
                    index,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if let Some(reason) = validate(&verse, &seen_ids) {
            loaded.rejected.push(MalformedRecord { index, reason });
            continue;
        }

        seen_ids.insert(verse.id);
        loaded.verses.push(verse);
    }

    Ok(loaded)
}

fn validate(verse: &Verse, seen_ids: &HashSet<u32>) -> Option<String> {
    if seen_ids.contains(&verse.id) {
        Some(format!("duplicate id {}", verse.id))
    } else if verse.text.trim().is_empty() {
        Some(format!("verse {} has no text", verse.id))
    } else if verse.book.trim().is_empty() {
        Some(format!("verse {} has no book", verse.id))
    } else if verse.age_group.trim().is_empty() {
        Some(format!("verse {} has no age group", verse.id))
    } else {
        None
    }
}

async fn fetch_bytes(source: &VerseSource) -> Result<Vec<u8>, LoadFailure> {
    match source {
        VerseSource::File(path) => Ok(tokio::fs::read(path).await?),
        VerseSource::Url(url) => {
            let client = reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(REQUEST_TIMEOUT)
                .build()?;

            let resp = client.get(url).send().await?;
            if !resp.status().is_success() {
                return Err(LoadFailure::Status(resp.status()));
            }
            Ok(resp.bytes().await?.to_vec())
        }
    }
}

/// Read and validate the whole collection.
pub async fn load_verses(source: &VerseSource) -> Result<LoadedVerses, DataLoadFailed> {
    let fail = |reason| DataLoadFailed {
        origin: source.to_string(),
        reason,
    };

    let bytes = fetch_bytes(source).await.map_err(fail)?;
    debug!(bytes = bytes.len(), %source, "fetched verse data");

    let loaded = parse_verses(&bytes).map_err(fail)?;
    for record in &loaded.rejected {
        warn!(index = record.index, reason = %record.reason, "skipping malformed verse record");
    }
    info!(
        verses = loaded.verses.len(),
        rejected = loaded.rejected.len(),
        %source,
        "verse collection loaded"
    );

    Ok(loaded)
}

/// Background task that loads the collection once and reports the outcome.
/// Aborting the returned handle cancels the load.
pub fn spawn_load(source: VerseSource, tx: mpsc::Sender<LoadEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = match load_verses(&source).await {
            Ok(loaded) => LoadEvent::Loaded(loaded),
            Err(e) => {
                warn!(error = %e, "verse load failed");
                LoadEvent::Failed(e)
            }
        };
        let _ = tx.send(event).await;
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    const GOOD: &str = r#"[
        {"id":1,"text":"For God so loved the world","book":"John","chapter":3,"verse":16,"topic":["love"],"ageGroup":"elementary"},
        {"id":2,"text":"The Lord is my shepherd","book":"Psalm","chapter":23,"verse":1,"topic":["comfort"],"ageGroup":"preteens"}
    ]"#;

    #[test]
    fn parses_well_formed_collection() {
        let loaded = parse_verses(GOOD.as_bytes()).unwrap();
        assert_eq!(loaded.verses.len(), 2);
        assert!(loaded.rejected.is_empty());
        assert_eq!(loaded.verses[1].reference(), "Psalm 23:1");
    }

    #[test]
    fn excludes_malformed_records_and_keeps_the_rest() {
        let json = r#"[
            {"id":1,"text":"ok","book":"John","chapter":1,"verse":1,"topic":[],"ageGroup":"preteens"},
            {"id":2,"book":"John","chapter":1,"verse":2,"topic":[],"ageGroup":"preteens"},
            {"id":3,"text":"   ","book":"John","chapter":1,"verse":3,"topic":[],"ageGroup":"preteens"},
            {"id":1,"text":"dup","book":"John","chapter":1,"verse":4,"topic":[],"ageGroup":"preteens"},
            "not a verse",
            {"id":6,"text":"fine","book":"Acts","chapter":"2","verse":"1-4","topic":["spirit"],"ageGroup":"elementary"},
            {"id":7,"text":"no age","book":"Acts","chapter":1,"verse":8,"topic":[],"ageGroup":""}
        ]"#;

        let loaded = parse_verses(json.as_bytes()).unwrap();
        let ids: Vec<u32> = loaded.verses.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 6]);

        let rejected: Vec<usize> = loaded.rejected.iter().map(|r| r.index).collect();
        assert_eq!(rejected, vec![1, 2, 3, 4, 6]);
        assert_eq!(loaded.rejected[2].reason, "duplicate id 1");
    }

    #[test]
    fn top_level_object_is_rejected() {
        let err = parse_verses(br#"{"verses": []}"#).unwrap_err();
        assert!(matches!(err, LoadFailure::NotAnArray));
    }

    #[test]
    fn garbage_is_a_decode_failure() {
        let err = parse_verses(b"<html>not json</html>").unwrap_err();
        assert!(matches!(err, LoadFailure::Decode(_)));
    }

    #[test]
    fn empty_array_loads_nothing() {
        let loaded = parse_verses(b"[]").unwrap();
        assert!(loaded.verses.is_empty());
        assert!(loaded.rejected.is_empty());
    }

    #[test]
    fn source_parsing_distinguishes_urls() {
        assert_eq!(
            VerseSource::parse("https://example.org/api/verses.json"),
            VerseSource::Url("https://example.org/api/verses.json".into())
        );
        assert_eq!(
            VerseSource::parse(" data/verses.json "),
            VerseSource::File(PathBuf::from("data/verses.json"))
        );
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GOOD.as_bytes()).unwrap();

        let source = VerseSource::File(file.path().to_path_buf());
        let loaded = load_verses(&source).await.unwrap();
        assert_eq!(loaded.verses.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_data_load_failed() {
        let dir = tempfile::tempdir().unwrap();
        let source = VerseSource::File(dir.path().join("nope.json"));

        let err = load_verses(&source).await.unwrap_err();
        assert!(matches!(err.reason, LoadFailure::Read(_)));
        assert!(err.to_string().contains("nope.json"));
    }

    /// Answer a single HTTP request with `response`, returning the URL to hit.
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&chunk[..n]),
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/api/verses.json", addr)
    }

    #[tokio::test]
    async fn http_error_status_is_data_load_failed() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
        )
        .await;

        let err = load_verses(&VerseSource::Url(url.clone())).await.unwrap_err();
        assert!(matches!(
            err.reason,
            LoadFailure::Status(status) if status == reqwest::StatusCode::NOT_FOUND
        ));
        assert_eq!(err.origin, url);
    }

    #[tokio::test]
    async fn loads_from_http() {
        let url = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            GOOD.len(),
            GOOD
        ))
        .await;

        let loaded = load_verses(&VerseSource::Url(url)).await.unwrap();
        assert_eq!(loaded.verses.len(), 2);
        assert_eq!(loaded.verses[0].reference(), "John 3:16");
    }

    #[tokio::test]
    async fn refused_connection_is_an_http_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = VerseSource::Url(format!("http://{}/api/verses.json", addr));
        let err = load_verses(&source).await.unwrap_err();
        assert!(matches!(err.reason, LoadFailure::Http(_)));
    }

    #[tokio::test]
    async fn spawned_load_reports_over_channel() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GOOD.as_bytes()).unwrap();

        let (tx, mut rx) = mpsc::channel(1);
        spawn_load(VerseSource::File(file.path().to_path_buf()), tx)
            .await
            .unwrap();

        match rx.recv().await {
            Some(LoadEvent::Loaded(loaded)) => assert_eq!(loaded.verses.len(), 2),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
