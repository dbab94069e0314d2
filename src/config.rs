use crate::errors::ConfigError;
use crate::models::PageSnapshot;
use std::{env, path::Path, path::PathBuf, time::Duration};
use tokio::fs;
use tracing::error;

const DEFAULT_BASE_URL: &str = "/";
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub origin: Option<String>,
    pub page_path: Option<PathBuf>,
    pub fetch_timeout: Duration,
}

pub fn resolve_config() -> Result<Config, ConfigError> {
    resolve_config_from(|name| env::var(name).ok())
}

pub fn resolve_config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let fetch_timeout = match lookup("BMS_FETCH_TIMEOUT_MS") {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|err| ConfigError::invalid("BMS_FETCH_TIMEOUT_MS", &value, err))?,
        None => Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
    };

    let origin = lookup("BMS_ORIGIN").filter(|value| !value.trim().is_empty());
    if let Some(origin) = &origin {
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            return Err(ConfigError::invalid("BMS_ORIGIN", origin, "expected an http(s) origin"));
        }
    }

    Ok(Config {
        base_url: lookup("BMS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        origin,
        page_path: lookup("BMS_PAGE_PATH").map(PathBuf::from),
        fetch_timeout,
    })
}

pub async fn load_snapshot(path: &Path) -> PageSnapshot {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("failed to parse page file: {err}");
                PageSnapshot::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => PageSnapshot::default(),
        Err(err) => {
            error!("failed to read page file: {err}");
            PageSnapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        resolve_config_from(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = resolve(&[]).unwrap();
        assert_eq!(config.base_url, "/");
        assert_eq!(config.origin, None);
        assert_eq!(config.page_path, None);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_all_variables() {
        let config = resolve(&[
            ("BMS_BASE_URL", "/bms/"),
            ("BMS_ORIGIN", "http://127.0.0.1:8000"),
            ("BMS_PAGE_PATH", "page.json"),
            ("BMS_FETCH_TIMEOUT_MS", "250"),
        ])
        .unwrap();
        assert_eq!(config.base_url, "/bms/");
        assert_eq!(config.origin.as_deref(), Some("http://127.0.0.1:8000"));
        assert_eq!(config.page_path, Some(PathBuf::from("page.json")));
        assert_eq!(config.fetch_timeout, Duration::from_millis(250));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(resolve(&[("BMS_FETCH_TIMEOUT_MS", "soon")]).is_err());
        let err = resolve(&[("BMS_ORIGIN", "bms.local")]).unwrap_err();
        assert!(err.to_string().contains("BMS_ORIGIN"));
    }

    #[tokio::test]
    async fn missing_page_file_is_empty() {
        let snapshot = load_snapshot(Path::new("/nonexistent/bms_cascade_page.json")).await;
        assert_eq!(snapshot, PageSnapshot::default());
    }

    fn temp_page_path(tag: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("bms_cascade_{tag}_{}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn unparsable_page_file_is_empty() {
        let path = temp_page_path("garbled");
        fs::write(&path, b"{ not json").await.unwrap();

        let snapshot = load_snapshot(&path).await;
        fs::remove_file(&path).await.unwrap();

        assert_eq!(snapshot, PageSnapshot::default());
    }

    #[tokio::test]
    async fn page_file_seeds_snapshot() {
        let path = temp_page_path("seeded");
        fs::write(
            &path,
            br#"{"base_url": "/bms/", "groups": [{"value": "3", "label": "Campus", "selected": true}]}"#,
        )
        .await
        .unwrap();

        let snapshot = load_snapshot(&path).await;
        fs::remove_file(&path).await.unwrap();

        assert_eq!(snapshot.base_url, "/bms/");
        assert_eq!(snapshot.group(), Some("3"));
        assert!(snapshot.buildings.is_empty());
    }
}
