//! Lazy sequence over a paginated result set
//!
//! `Pages` starts from the first response body and hands out items one at a
//! time. When the current page runs out and a next-page link is present, the
//! following page is fetched through the borrowed `RequestHandler`, replacing
//! the old one. Nothing is fetched ahead of need, so at most one page is held.

use super::types::{Page, PageInfo};
use crate::error::{Error, Result};
use crate::http::{RequestConfig, RequestHandler};
use crate::types::JsonValue;
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Items of a list endpoint, fetched page by page on demand
#[derive(Debug, Clone)]
pub struct Pages<'a, T = JsonValue> {
    handler: &'a RequestHandler,
    page: Page<T>,
    cursor: usize,
    automatic_pagination: bool,
    exhausted: bool,
    fetches: usize,
}

impl<'a, T> Pages<'a, T>
where
    T: DeserializeOwned + Clone,
{
    /// Wrap the first page of a list response
    ///
    /// With `automatic_pagination` off the sequence ends with the first page;
    /// the next-page link stays readable through [`Pages::next_page_url`].
    pub fn new(
        handler: &'a RequestHandler,
        body: JsonValue,
        result_key: &str,
        automatic_pagination: bool,
    ) -> Result<Self> {
        Ok(Self {
            handler,
            page: Page::from_json(body, result_key)?,
            cursor: 0,
            automatic_pagination,
            exhausted: false,
            fetches: 0,
        })
    }

    /// Next item, fetching the following page when the current one is spent
    ///
    /// A failed fetch leaves the current page and cursor untouched, so calling
    /// again retries the same fetch.
    pub async fn next_item(&mut self) -> Result<Option<T>> {
        loop {
            if self.exhausted {
                return Ok(None);
            }

            if let Some(item) = self.page.items().get(self.cursor).cloned() {
                self.cursor += 1;
                return Ok(Some(item));
            }

            if !self.automatic_pagination || !self.fetch_next_page().await? {
                self.exhausted = true;
                return Ok(None);
            }
        }
    }

    /// Replace the current page with the next one
    ///
    /// Returns `false` without a request when there is no next page. Works
    /// regardless of `automatic_pagination`, for callers paging by hand.
    pub async fn fetch_next_page(&mut self) -> Result<bool> {
        let Some(url) = self.page.next_page_url().map(ToString::to_string) else {
            return Ok(false);
        };

        let next = self.page.info().current.saturating_add(1);
        debug!(
            "fetching page {} of {} for '{}'",
            next,
            self.page.info().total,
            self.page.result_key()
        );
        let body = self.handler.get(RequestConfig::url(url)).await?;
        self.page = Page::from_json(body, self.page.result_key())?;
        self.cursor = 0;
        self.exhausted = false;
        self.fetches += 1;
        Ok(true)
    }

    /// Every item of the current page and all pages after it
    ///
    /// Follows next-page links even when automatic pagination is off, and
    /// includes items of the current page already handed out.
    pub async fn all(mut self) -> Result<Vec<T>> {
        let mut items = self.page.items().to_vec();
        while self.fetch_next_page().await? {
            items.extend_from_slice(self.page.items());
        }
        Ok(items)
    }

    /// Adapt into a `Stream` of items
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + 'a
    where
        T: 'a,
    {
        stream::try_unfold(self, |mut pages| async move {
            let item = pages.next_item().await?;
            Ok::<_, Error>(item.map(|item| (item, pages)))
        })
    }
}

impl<T> Pages<'_, T> {
    /// Page currently held
    pub fn current_page(&self) -> &Page<T> {
        &self.page
    }

    /// Metadata of the current page
    pub fn page_info(&self) -> &PageInfo {
        self.page.info()
    }

    /// Link to the following page, for manual paging
    pub fn next_page_url(&self) -> Option<&str> {
        self.page.next_page_url()
    }

    pub fn automatic_pagination(&self) -> bool {
        self.automatic_pagination
    }

    /// Check if the sequence has ended
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Follow-up pages fetched so far
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }
}
