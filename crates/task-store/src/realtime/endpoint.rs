//! Connection Config and REST Endpoints

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::iter;

use crate::domain::{StoreError, StoreResult, TaskId, TASKS_PATH};

/// Characters escaped inside one path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped inside a query value
const QUERY_VALUE: &AsciiSet = &SEGMENT.add(b'&').add(b'+').add(b'=');

/// Remote database credentials, e.g.
/// `{"databaseUrl": "https://example.firebaseio.com", "auth": null}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    pub database_url: String,
    #[serde(default)]
    pub auth: Option<String>,
}

impl RemoteConfig {
    pub fn endpoint(&self) -> StoreResult<RestEndpoint> {
        RestEndpoint::new(&self.database_url, self.auth.as_deref())
    }
}

/// Validated base URL plus optional auth token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestEndpoint {
    base_url: String,
    auth: Option<String>,
}

impl RestEndpoint {
    pub fn new(database_url: &str, auth: Option<&str>) -> StoreResult<Self> {
        let base_url = database_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(StoreError::Config("database URL is empty".to_string()));
        }
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(StoreError::Config(format!(
                "database URL must be http(s): {}",
                base_url
            )));
        }
        let auth = auth
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_owned);
        Ok(Self {
            base_url: base_url.to_owned(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stream and read URL of the whole collection
    pub fn collection_url(&self) -> String {
        self.url_for(TASKS_PATH.split('/'))
    }

    /// Write/delete URL of one record
    pub fn record_url(&self, id: &TaskId) -> String {
        self.url_for(TASKS_PATH.split('/').chain(iter::once(id.as_str())))
    }

    /// The key is one segment, so a `/` inside it is escaped
    fn url_for<'a>(&self, path: impl Iterator<Item = &'a str>) -> String {
        let segments: Vec<String> = path
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect();
        let mut url = format!("{}/{}.json", self.base_url, segments.join("/"));
        if let Some(auth) = &self.auth {
            url.push_str("?auth=");
            url.push_str(&utf8_percent_encode(auth, QUERY_VALUE).to_string());
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_and_record_urls() {
        let endpoint = RestEndpoint::new("https://demo.firebaseio.com/", None).unwrap();
        assert_eq!(
            endpoint.collection_url(),
            "https://demo.firebaseio.com/users/tasks.json"
        );
        assert_eq!(
            endpoint.record_url(&TaskId::new("-Nabc_12")),
            "https://demo.firebaseio.com/users/tasks/-Nabc_12.json"
        );
    }

    #[test]
    fn test_auth_and_odd_keys_are_encoded() {
        let endpoint = RestEndpoint::new("https://demo.firebaseio.com", Some("a+b=c&d")).unwrap();
        assert_eq!(
            endpoint.record_url(&TaskId::new("odd key/#")),
            "https://demo.firebaseio.com/users/tasks/odd%20key%2F%23.json?auth=a%2Bb%3Dc%26d"
        );
    }

    #[test]
    fn test_blank_auth_is_dropped() {
        let endpoint = RestEndpoint::new("https://demo.firebaseio.com", Some("  ")).unwrap();
        assert!(!endpoint.collection_url().contains("auth"));
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        assert!(matches!(RestEndpoint::new("   ", None), Err(StoreError::Config(_))));
        assert!(matches!(
            RestEndpoint::new("ftp://demo", None),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn test_config_from_json() {
        let config: RemoteConfig =
            serde_json::from_str(r#"{"databaseUrl": "https://demo.firebaseio.com"}"#).unwrap();
        assert_eq!(config.auth, None);
        assert_eq!(config.endpoint().unwrap().base_url(), "https://demo.firebaseio.com");

        assert!(serde_json::from_str::<RemoteConfig>(r#"{"url": "x"}"#).is_err());

        let blank = RemoteConfig {
            database_url: String::new(),
            auth: None,
        };
        assert!(matches!(blank.endpoint(), Err(StoreError::Config(_))));
    }
}
