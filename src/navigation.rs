use std::time::Duration;

use crate::models::treaty::TreatyId;

/// The pages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard,
    Detail(TreatyId),
    Create,
}

impl Page {
    /// The page's relative address.
    pub fn href(&self) -> String {
        match self {
            Page::Login => "index.html".to_string(),
            Page::Dashboard => "dashboard.html".to_string(),
            Page::Detail(id) => format!("detail.html?id={}", id),
            Page::Create => "create.html".to_string(),
        }
    }
}

/// A pending move to another page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub to: Page,
    pub delay: Duration,
}

impl Navigation {
    pub fn now(to: Page) -> Self {
        Self {
            to,
            delay: Duration::ZERO,
        }
    }

    pub fn after(to: Page, delay: Duration) -> Self {
        Self { to, delay }
    }
}
