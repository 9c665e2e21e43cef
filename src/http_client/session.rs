//! Persisted session cookies.
//!
//! Cookies live in a `reqwest` jar during a run and are mirrored to a JSON
//! file after every fetch so the next run continues the same session.
//! Concurrent runs sharing one file can overwrite each other's writes.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use reqwest::cookie::{CookieStore, Jar};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

/// A cookie as written to the session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    /// Host the cookie was received from.
    pub domain: String,
}

/// Cookie jar backed by an optional file.
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    jar: Arc<Jar>,
    cookies: Mutex<Vec<StoredCookie>>,
}

impl SessionStore {
    /// A session that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            jar: Arc::new(Jar::default()),
            cookies: Mutex::new(Vec::new()),
        }
    }

    /// Load the session file at `path`.
    ///
    /// A missing, unreadable, or corrupt file starts an empty session.
    pub fn load(path: &Path) -> Self {
        let cookies = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Vec<StoredCookie>>(&content) {
                Ok(cookies) => cookies,
                Err(e) => {
                    warn!("Ignoring corrupt session file {:?}: {}", path, e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!("Ignoring unreadable session file {:?}: {}", path, e);
                Vec::new()
            }
        };

        let jar = Jar::default();
        for cookie in &cookies {
            let domain = cookie.domain.trim_start_matches('.');
            if cookie.name.is_empty() || domain.is_empty() {
                continue;
            }
            match Url::parse(&format!("https://{}/", domain)) {
                Ok(url) => jar.add_cookie_str(&format!("{}={}", cookie.name, cookie.value), &url),
                Err(e) => debug!("Skipping cookie for invalid domain {:?}: {}", domain, e),
            }
        }
        debug!("Loaded {} cookies from {:?}", cookies.len(), path);

        Self {
            path: Some(path.to_path_buf()),
            jar: Arc::new(jar),
            cookies: Mutex::new(cookies),
        }
    }

    /// The jar to install as the HTTP client's cookie provider.
    pub fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Snapshot of the cookies known to the store.
    pub fn cookies(&self) -> Vec<StoredCookie> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StoredCookie>> {
        self.cookies.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the stored cookies for `url`'s host with what the jar now
    /// holds for it, then write the file.
    ///
    /// Write failures are logged; they never fail the fetch.
    pub fn flush(&self, url: &str) {
        let Ok(url) = Url::parse(url) else {
            return;
        };
        let Some(host) = url.host_str().map(|h| h.to_string()) else {
            return;
        };

        let current: Vec<(String, String)> = self
            .jar
            .cookies(&url)
            .and_then(|header| header.to_str().ok().map(parse_cookie_header))
            .unwrap_or_default();

        // The jar is authoritative for this host: cookies it expired or
        // deleted are dropped from the file as well.
        let snapshot = {
            let mut stored = self.lock();
            stored.retain(|c| c.domain != host);
            stored.extend(current.into_iter().map(|(name, value)| StoredCookie {
                name,
                value,
                domain: host.clone(),
            }));
            stored.clone()
        };

        if let Some(path) = &self.path {
            if let Err(e) = write_cookies(path, &snapshot) {
                warn!("Failed to save session file {:?}: {}", path, e);
            }
        }
    }
}

/// Split a `Cookie` request header into name/value pairs.
fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            if name.is_empty() {
                None
            } else {
                Some((name.to_string(), value.to_string()))
            }
        })
        .collect()
}

fn write_cookies(path: &Path, cookies: &[StoredCookie]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(cookies)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = SessionStore::load(&dir.path().join("absent.json"));
        assert!(store.cookies().is_empty());
    }

    #[test]
    fn corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "#LWP-Cookies-2.0\nSet-Cookie3: NID=1").unwrap();

        let store = SessionStore::load(&path);
        assert!(store.cookies().is_empty());
    }

    #[test]
    fn flush_persists_and_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let url = "https://www.google.com/";

        let store = SessionStore::load(&path);
        let parsed = Url::parse(url).unwrap();
        store.jar().add_cookie_str("NID=abc123; Path=/", &parsed);
        store.flush(url);

        assert!(path.exists());
        let reloaded = SessionStore::load(&path);
        assert_eq!(
            reloaded.cookies(),
            vec![StoredCookie {
                name: "NID".to_string(),
                value: "abc123".to_string(),
                domain: "www.google.com".to_string(),
            }]
        );

        let header = reloaded.jar().cookies(&parsed).unwrap();
        assert_eq!(header.to_str().unwrap(), "NID=abc123");
    }

    #[test]
    fn flush_updates_existing_value() {
        let store = SessionStore::in_memory();
        let url = Url::parse("https://www.google.com/").unwrap();

        store.jar().add_cookie_str("NID=one", &url);
        store.flush(url.as_str());
        store.jar().add_cookie_str("NID=two", &url);
        store.flush(url.as_str());

        let cookies = store.cookies();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].value, "two");
        assert!(store.path().is_none());
    }

    #[test]
    fn deleted_cookie_is_not_reloaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let url = Url::parse("https://www.google.com/").unwrap();

        let store = SessionStore::load(&path);
        store.jar().add_cookie_str("NID=one", &url);
        store.jar().add_cookie_str("1P_JAR=keep", &url);
        store.flush(url.as_str());
        assert_eq!(store.cookies().len(), 2);

        store.jar().add_cookie_str("NID=; Max-Age=0", &url);
        store.flush(url.as_str());

        let reloaded = SessionStore::load(&path);
        assert_eq!(
            reloaded.cookies(),
            vec![StoredCookie {
                name: "1P_JAR".to_string(),
                value: "keep".to_string(),
                domain: "www.google.com".to_string(),
            }]
        );
        let header = reloaded.jar().cookies(&url).unwrap();
        assert_eq!(header.to_str().unwrap(), "1P_JAR=keep");
    }

    #[test]
    fn flush_keeps_other_hosts() {
        let store = SessionStore::in_memory();
        let engine = Url::parse("https://www.google.com/").unwrap();
        let other = Url::parse("https://consent.example.com/").unwrap();

        store.jar().add_cookie_str("NID=one", &engine);
        store.flush(engine.as_str());
        store.jar().add_cookie_str("CONSENT=yes", &other);
        store.flush(other.as_str());

        let mut names: Vec<String> = store.cookies().into_iter().map(|c| c.name).collect();
        names.sort();
        assert_eq!(names, vec!["CONSENT".to_string(), "NID".to_string()]);
    }

    #[test]
    fn cookie_header_parsing() {
        assert_eq!(
            parse_cookie_header("a=1; b=x=y; =bad; c"),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x=y".to_string())
            ]
        );
    }
}
