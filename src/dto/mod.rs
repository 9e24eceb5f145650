//! Request and response shapes
//!
//! Requests derive `validator::Validate`; responses serialize camelCase.

use serde::Serialize;
use validator::ValidationError;

use crate::error::{AppError, AppResult};

pub mod ai;
pub mod auth;
pub mod inventory;
pub mod message;
pub mod operation;
pub mod product;
pub mod transaction;
pub mod user;
pub mod warehouse;

/// One page of a listing
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// 0-based page index
    pub number: u64,
    pub size: u64,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u64, size: u64, total_elements: u64, total_pages: u64) -> Self {
        let number_of_elements = content.len() as u64;
        Self {
            first: number == 0,
            last: number.saturating_add(1) >= total_pages,
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number,
            size,
            number_of_elements,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        let (page, content) = self.take_content();
        page.with_content(content.into_iter().map(f).collect())
    }

    /// Split off the rows, leaving the paging metadata
    pub fn take_content(mut self) -> (Page<()>, Vec<T>) {
        let content = std::mem::take(&mut self.content);
        let page = Page {
            content: Vec::new(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        };
        (page, content)
    }
}

impl Page<()> {
    /// Reattach rows produced from the ones removed by `take_content`
    pub fn with_content<U>(self, content: Vec<U>) -> Page<U> {
        Page {
            content,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}

/// `{"message": "..."}` acknowledgement
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub message: String,
}

impl ActionResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Unwrap a field that validation already marked as required
pub fn required<T>(value: Option<T>, message: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::Validation(message.to_string()))
}
