//! LetraTag Printer Codec
//!
//! This crate encodes print jobs for the DYMO LetraTag LT-200B Bluetooth
//! label printer and decodes the status it notifies back. It produces and
//! consumes plain byte buffers; the BLE connection itself is supplied by the
//! caller through the [`Transport`] trait.
//!
//! # Example
//!
//! ```rust
//! use letratag::{chunk, Canvas, Payload, Request, Status};
//!
//! let mut canvas = Canvas::blank(8).unwrap();
//! canvas.set_pixel(0, 0, true).unwrap();
//! let canvas = canvas.stretch(2).unwrap();
//!
//! let request = Request::Print {
//!     width: canvas.width(),
//!     image: canvas.serialize(),
//! };
//! let writes = Payload::new(&request)
//!     .unwrap()
//!     .writes(chunk::CHUNK_DATA_SIZE)
//!     .unwrap();
//! assert_eq!(writes[0].len(), 9);
//!
//! let status = Status::from_bytes(&[0x1B, 0x52, 0x00]).unwrap();
//! assert_eq!(status, Status::Success);
//! ```

pub mod canvas;
pub mod chunk;
pub mod device;
pub mod directive;
mod error;
pub mod payload;
mod printer;
pub mod status;

pub use crate::{
    canvas::Canvas,
    chunk::{split, Chunk},
    directive::Directive,
    error::{Error, Result},
    payload::{build_print_request, build_set_media_type, compute_header, Payload, Request},
    printer::{Config, Printer, Transport},
    status::{Confidence, Status},
};

/// Printable rows. Every label is exactly this many dots tall.
pub const HEIGHT: u32 = 32;

/// Bytes holding one column of [`HEIGHT`] pixels.
pub const BYTES_PER_COLUMN: usize = 4;

/// Widest image the printer accepts, in columns (1024 * 8).
pub const MAX_WIDTH: u32 = 8192;
