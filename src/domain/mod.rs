// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value types and business rules, no I/O.
//!
//! # Modules
//!
//! - [`history`]: Edit history types ([`ImageHistory`](history::ImageHistory),
//!   [`FilterAction`](history::FilterAction), [`FilterCategory`](history::FilterCategory))
//! - [`versioning`]: Version naming types ([`VersionFileInfo`](versioning::VersionFileInfo),
//!   [`VersionFileOperation`](versioning::VersionFileOperation),
//!   [`VersionManagerSettings`](versioning::VersionManagerSettings))

pub mod history;
pub mod versioning;
