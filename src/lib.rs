//! starterm: paged text-terminal menus.
//!
//! A `Page` holds rows and actions; running it renders one screen, reads
//! one line, and resolves it until something other than paging comes out.
//! The other modules are tools built on pages.

pub mod chooser;
pub mod config;
pub mod dashboard;
pub mod demo;
pub mod error;
pub mod launcher;
pub mod menu;
pub mod mock;
pub mod page;
pub mod report;
pub mod strings;
pub mod types;
