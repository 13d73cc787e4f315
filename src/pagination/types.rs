//! Page types
//!
//! A list response is a JSON object holding the item array under a result
//! key, plus a `pages` object describing where it sits in the result set:
//!
//! ```json
//! {
//!   "pages": {"current": 1, "total": 2, "next_page": "https://.../events/pages/08a07b034306679e"},
//!   "events": [ ... ]
//! }
//! ```

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Position of a page within its result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-based number of this page
    #[serde(default = "first_page")]
    pub current: u32,
    /// Total number of pages
    #[serde(default = "first_page")]
    pub total: u32,
    /// URL of the following page, absent on the last one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

fn first_page() -> u32 {
    1
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            current: 1,
            total: 1,
            next_page: None,
        }
    }
}

impl PageInfo {
    /// Check if another page follows
    pub fn has_next(&self) -> bool {
        self.next_page.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// One page of a list response
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    result_key: String,
    info: PageInfo,
}

impl<T: DeserializeOwned> Page<T> {
    /// Split a response body into its items and page metadata
    ///
    /// A body without `pages` is treated as the only page.
    pub fn from_json(mut body: Value, result_key: &str) -> Result<Self> {
        let items = body
            .get_mut(result_key)
            .map(Value::take)
            .ok_or_else(|| Error::missing_result_key(result_key))?;
        let items: Vec<T> = serde_json::from_value(items)?;

        let info = match body.get_mut("pages").map(Value::take) {
            Some(Value::Null) | None => PageInfo::default(),
            Some(pages) => serde_json::from_value(pages)?,
        };

        Ok(Self {
            items,
            result_key: result_key.to_string(),
            info,
        })
    }
}

impl<T> Page<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn result_key(&self) -> &str {
        &self.result_key
    }

    pub fn info(&self) -> &PageInfo {
        &self.info
    }

    /// URL of the following page
    pub fn next_page_url(&self) -> Option<&str> {
        if self.info.has_next() {
            self.info.next_page.as_deref()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
