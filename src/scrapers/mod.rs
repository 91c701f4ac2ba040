//! News site scrapers.
//!
//! Only one site is supported. The scraper follows a two-phase pattern:
//!
//! 1. **Search**: drive the site's search UI and count the result elements
//! 2. **Collect**: read, filter and enrich each result into a [`ResultSet`]
//!
//! Both phases talk to the browser exclusively through
//! [`PageDriver`](crate::browser::PageDriver).
//!
//! [`ResultSet`]: crate::models::ResultSet

pub mod apnews;
