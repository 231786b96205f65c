//! Notebook level tests: discovery, link resolution and publishing.

mod links;
mod publish;
