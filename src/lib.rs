//! # librosple
//!
//! Export engine for Peruvian electronic accounting books (PLE) and PDT 710
//! annual return extracts.
//!
//! A caller hands over a [`Workbook`](core::Workbook) (sheets of typed cells,
//! already fetched from wherever they live) and a target directory. Each
//! book family reads its header sheet, walks the book sheets it knows and
//! writes pipe-delimited, CRLF-terminated flat files named after the
//! regulatory conventions.
//!
//! Amounts are handled as [`rust_decimal::Decimal`]; cells arrive as `f64`
//! and are converted through their shortest textual form.
//!
//! ## Quick Start
//!
//! ```rust
//! use librosple::core::*;
//!
//! let params = BookParametersBuilder::new("20512345678", "2023")
//!     .month("12")
//!     .day("31")
//!     .build();
//! assert_eq!(
//!     params.file_name("030300", true),
//!     "LE2051234567820231231030300001111.txt"
//! );
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Cell model, field formatting, keys, file naming, export runner |
//! | `inventories` (default) | Inventories and balances books (`LE03…`) |
//! | `costs` (default) | Cost records books (`LE10…`) |
//! | `assets` (default) | Fixed assets books (`LE07…`) |
//! | `pdt` (default) | PDT 710 extracts with small-value consolidation |
//! | `doi` (default) | Identity document number checks |
//! | `json` | Load a workbook snapshot from JSON |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "inventories")]
pub mod inventories;

#[cfg(feature = "costs")]
pub mod costs;

#[cfg(feature = "assets")]
pub mod assets;

#[cfg(feature = "pdt")]
pub mod pdt;

#[cfg(feature = "doi")]
pub mod doi;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
