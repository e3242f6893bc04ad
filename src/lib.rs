//! Client for the treaty ledger REST backend.
//!
//! Each handler maps one user action on a page to at most one backend request
//! and renders the answer into that page. Role checks here only decide what
//! the pages offer; the backend is responsible for enforcing them.

pub mod api;
pub mod config;
pub mod error;
pub mod navigation;
pub mod state;
pub mod storage;

pub mod models {
    pub mod audit_log;
    pub mod report;
    pub mod session;
    pub mod treaty;
}

pub mod repositories {
    pub mod audit_log;
    pub mod report;
    pub mod treaty;
}

pub mod services {
    pub mod auth;
    pub mod treaties;
}

pub mod handlers {
    pub mod create;
    pub mod dashboard;
    pub mod detail;
    pub mod login;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod treaty;
}

pub mod view {
    pub mod audit_log;
    pub mod dom;
    pub mod message;
    pub mod reports;
    pub mod treaty_form;
    pub mod treaty_list;
}
