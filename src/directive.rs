//! Directive encoding.
//!
//! A print job is a sequence of directives, each an `ESC` byte followed by a
//! single ASCII command byte and, for some commands, a fixed-layout body.
//!
//! | Directive       | Command | Body                                         |
//! |-----------------|---------|----------------------------------------------|
//! | `START`         | `s`     | job id `9A 02 00 00`                         |
//! | `MEDIA_TYPE`    | `M`     | 1 opaque byte                                |
//! | `PRINT_DENSITY` | `C`     | 1 opaque byte (unused by the vendor app)     |
//! | `PRINT_DATA`    | `D`     | `01 02` + width u32 LE + height u32 LE + img |
//! | `FORM_FEED`     | `E`     |                                              |
//! | `STATUS`        | `A`     |                                              |
//! | `END`           | `Q`     |                                              |

use crate::error::{Error, Result};
use crate::{BYTES_PER_COLUMN, HEIGHT};

pub const ESC: u8 = 0x1B;

pub const CMD_START: u8 = b's';
pub const CMD_MEDIA_TYPE: u8 = b'M';
pub const CMD_PRINT_DENSITY: u8 = b'C';
pub const CMD_PRINT_DATA: u8 = b'D';
pub const CMD_FORM_FEED: u8 = b'E';
pub const CMD_STATUS: u8 = b'A';
pub const CMD_END: u8 = b'Q';

/// Job id sent with `START`.
///
/// The printer only emits a short blank label without it. It is the same
/// constant for every job.
pub const JOB_ID: [u8; 4] = [0x9A, 0x02, 0x00, 0x00];

pub const BITS_PER_PIXEL: u8 = 1;
pub const ALIGNMENT: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Start,
    MediaType(u8),
    PrintDensity(u8),
    PrintData { width: u32, image: Vec<u8> },
    FormFeed,
    Status,
    End,
}

impl Directive {
    /// Build a `PRINT_DATA` directive, checking that `image` holds exactly
    /// 4 bytes per column.
    pub fn print_data(width: u32, image: Vec<u8>) -> Result<Self> {
        let expected = width as usize * BYTES_PER_COLUMN;
        if image.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: image.len(),
            });
        }
        Ok(Directive::PrintData { width, image })
    }

    pub fn command(&self) -> u8 {
        match self {
            Self::Start => CMD_START,
            Self::MediaType(_) => CMD_MEDIA_TYPE,
            Self::PrintDensity(_) => CMD_PRINT_DENSITY,
            Self::PrintData { .. } => CMD_PRINT_DATA,
            Self::FormFeed => CMD_FORM_FEED,
            Self::Status => CMD_STATUS,
            Self::End => CMD_END,
        }
    }

    /// Number of bytes [`encode_into`](Self::encode_into) appends.
    pub fn encoded_len(&self) -> usize {
        2 + match self {
            Self::Start => JOB_ID.len(),
            Self::MediaType(_) | Self::PrintDensity(_) => 1,
            Self::PrintData { image, .. } => 10 + image.len(),
            Self::FormFeed | Self::Status | Self::End => 0,
        }
    }

    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.push(ESC);
        buf.push(self.command());
        match self {
            Self::Start => buf.extend_from_slice(&JOB_ID),
            Self::MediaType(value) | Self::PrintDensity(value) => buf.push(*value),
            Self::PrintData { width, image } => {
                buf.push(BITS_PER_PIXEL);
                buf.push(ALIGNMENT);
                buf.extend_from_slice(&width.to_le_bytes());
                buf.extend_from_slice(&HEIGHT.to_le_bytes());
                buf.extend_from_slice(image);
            }
            Self::FormFeed | Self::Status | Self::End => {}
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf
    }
}

pub fn start() -> Vec<u8> {
    Directive::Start.encode()
}

/// Encode `PRINT_DATA` for an image `width` columns wide.
///
/// `image` must be [`Canvas::serialize`](crate::Canvas::serialize) output,
/// i.e. exactly `4 * width` bytes.
pub fn print_data(width: u32, image: &[u8]) -> Result<Vec<u8>> {
    Ok(Directive::print_data(width, image.to_vec())?.encode())
}

pub fn form_feed() -> Vec<u8> {
    Directive::FormFeed.encode()
}

pub fn status() -> Vec<u8> {
    Directive::Status.encode()
}

pub fn end() -> Vec<u8> {
    Directive::End.encode()
}

/// Encode `MEDIA_TYPE`. What the value selects is not known, so it is sent
/// as given.
pub fn media_type(value: u8) -> Vec<u8> {
    Directive::MediaType(value).encode()
}

pub fn print_density(value: u8) -> Vec<u8> {
    Directive::PrintDensity(value).encode()
}
