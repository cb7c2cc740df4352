//! Helpcenter - browse, search and check off step-by-step help content
//!
//! The library holds the content model, completion tracking, search and the
//! navigation state machine. The `helpcenter` binary puts a terminal UI and
//! a handful of one-shot commands on top.

pub mod completion;
pub mod config;
pub mod content;
pub mod navigation;
pub mod search;
pub mod view;
