//! Collects files and directories into zip archives ready for download.
//!
//! `zipbundle-core` gathers source paths into an ordered, duplicate-free
//! storage (single files, shallow listings, or recursive walks with depth and
//! files-only selection), then writes them into a deterministic zip archive.
//! A strip prefix shortens entry names, but only if it matches every stored
//! path. The [`delivery`] module turns the finished file into download
//! headers and a body stream.
//!
//! # Examples
//!
//! ```no_run
//! use zipbundle_core::Archiver;
//! use zipbundle_core::Depth;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut archiver = Archiver::new()?;
//! archiver
//!     .add_directory_recursive("/srv/files/dir1", Depth::Unlimited, false)?
//!     .set_strip_prefix("/srv/files/dir1");
//!
//! let written = archiver.build("/tmp/dir1.zip")?;
//! assert!(written);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archiver;
pub mod config;
pub mod delivery;
pub mod error;
pub mod naming;
pub mod progress;
pub mod report;
pub mod storage;
pub mod walker;
mod writer;

// Re-export main API types
pub use archiver::Archiver;
pub use config::ArchiverConfig;
pub use delivery::Disposition;
pub use delivery::Download;
pub use error::ArchiverError;
pub use error::Result;
pub use progress::NoopProgress;
pub use progress::ProgressCallback;
pub use report::BuildReport;
pub use storage::Storage;
pub use walker::Depth;
