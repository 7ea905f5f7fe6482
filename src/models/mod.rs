pub mod agreement_types;
pub mod businesses;
pub mod contacts;
pub mod leads;
pub mod notifications;
pub mod offers;
pub mod permissions;
pub mod projects;
pub mod role_permissions;
pub mod roles;
pub mod service_agreements;
pub mod settings;
pub mod users;

use serde::{Deserialize, Serialize};

/// `?page=N` on listing endpoints. Page size is fixed by configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

impl PageQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// One page of a listing plus the totals needed to render pager links.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Trims a submitted optional text field, collapsing blanks to `None`.
pub fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
