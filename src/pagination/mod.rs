//! Pagination module
//!
//! # Overview
//!
//! List endpoints such as `events` and `free_busy` return one page at a time
//! with a link to the next. [`Pages`] presents the whole result set as a
//! single sequence and fetches later pages only when the consumer reaches
//! them. With automatic pagination disabled it stops after the first page and
//! leaves the next-page link for the caller.

mod pages;
mod types;

pub use pages::Pages;
pub use types::{Page, PageInfo};

#[cfg(test)]
mod tests;
