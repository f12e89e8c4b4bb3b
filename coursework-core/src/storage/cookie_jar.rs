use super::{CookieStore, KeyValueStore};
use chrono::{DateTime, NaiveDateTime, Utc};
use shared_types::StorageError;
use std::fmt;
use tracing::warn;

const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        };
        f.write_str(value)
    }
}

/// A cookie as written by `document.cookie = ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    /// Raw value, already percent-encoded by the caller
    pub value: String,
    /// `None` is a session cookie
    pub expires: Option<DateTime<Utc>>,
    pub path: String,
    pub same_site: SameSite,
}

impl Cookie {
    /// Site-wide, same-site-strict cookie expiring at `expires`
    pub fn new(name: impl Into<String>, value: impl Into<String>, expires: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: Some(expires),
            path: "/".to_string(),
            same_site: SameSite::Strict,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.map(|expires| expires <= now).unwrap_or(false)
    }

    /// `name=value; expires=...; path=/; SameSite=Strict`
    pub fn to_header_string(&self) -> String {
        let mut header = format!("{}={}", self.name, self.value);
        if let Some(expires) = self.expires {
            header.push_str(&format!("; expires={}", expires.format(EXPIRES_FORMAT)));
        }
        header.push_str(&format!("; path={}; SameSite={}", self.path, self.same_site));
        header
    }

    /// Parse a line produced by [`Cookie::to_header_string`]
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;
        if name.is_empty() {
            return None;
        }

        let mut cookie = Cookie {
            name: name.to_string(),
            value: value.to_string(),
            expires: None,
            path: "/".to_string(),
            same_site: SameSite::Lax,
        };

        for attribute in parts {
            let (key, value) = match attribute.trim().split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => continue,
            };

            match key.to_ascii_lowercase().as_str() {
                "expires" => {
                    cookie.expires = NaiveDateTime::parse_from_str(value, EXPIRES_FORMAT)
                        .ok()
                        .map(|naive| naive.and_utc());
                }
                "path" => cookie.path = value.to_string(),
                "samesite" => {
                    cookie.same_site = match value.to_ascii_lowercase().as_str() {
                        "strict" => SameSite::Strict,
                        "none" => SameSite::None,
                        _ => SameSite::Lax,
                    };
                }
                _ => {}
            }
        }

        Some(cookie)
    }
}

/// Find `name` in a `document.cookie` style header (`a=1; b=2`)
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .map(str::trim_start)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

/// Cookie jar keeping one header line per cookie name in a key-value store
#[derive(Debug)]
pub struct KvCookieJar<S> {
    store: S,
}

impl<S: KeyValueStore> KvCookieJar<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Full stored cookie, including attributes, if it has not expired
    pub fn cookie_at(&self, name: &str, now: DateTime<Utc>) -> Result<Option<Cookie>, StorageError> {
        let line = match self.store.get(name)? {
            Some(line) => line,
            None => return Ok(None),
        };

        let cookie = match Cookie::parse(&line) {
            Some(cookie) => cookie,
            None => {
                warn!("Dropping unparsable cookie entry {}", name);
                return Ok(None);
            }
        };

        if cookie.is_expired_at(now) {
            self.store.remove(name)?;
            return Ok(None);
        }

        Ok(Some(cookie))
    }
}

impl<S: KeyValueStore> CookieStore for KvCookieJar<S> {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(self.cookie_at(name, Utc::now())?.map(|cookie| cookie.value))
    }

    fn set(&self, cookie: &Cookie) -> Result<(), StorageError> {
        self.store.set(&cookie.name, &cookie.to_header_string())
    }
}
