//! Sidecar metadata generation for published synoptic chart images.
//!
//! The library builds the small JSON document that sits next to
//! `synoptic/atlantic_focus.png`, recording provenance timestamps and
//! revision-pinned links to the image and its companion JSON files.
//!
//! ```
//! use synoptic_sidecar::clock::SystemClock;
//! use synoptic_sidecar::sidecar::{SidecarInputs, build};
//!
//! let inputs = SidecarInputs {
//!     commit: Some("c0ffee".to_string()),
//!     ..SidecarInputs::default()
//! };
//! let doc = build(&inputs, &SystemClock);
//! assert!(doc.has_urls());
//! ```

#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod sidecar;

pub use error::{Error, Result};
