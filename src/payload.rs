//! Request framing.
//!
//! A request body (the directive sequence) is preceded by a 9 byte header:
//!
//! ```text
//! FF F0 12 34 <body length: u32 LE> <checksum>
//! ```
//!
//! where the checksum is the low byte of the sum of the first 8 bytes.

use std::convert::TryFrom;

use log::debug;

use crate::chunk::{self, Chunk};
use crate::directive::Directive;
use crate::error::{Error, Result};

pub const PREAMBLE: u8 = 0xFF;
pub const FLAGS: u8 = 0xF0;
pub const MAGIC: [u8; 2] = [0x12, 0x34];
pub const HEADER_LEN: usize = 9;

/// Build the header for a body of `payload_len` bytes.
pub fn compute_header(payload_len: usize) -> Result<[u8; HEADER_LEN]> {
    let len = u32::try_from(payload_len).map_err(|_| Error::PayloadTooLarge(payload_len))?;

    let mut header = [0u8; HEADER_LEN];
    header[0] = PREAMBLE;
    header[1] = FLAGS;
    header[2..4].copy_from_slice(&MAGIC);
    header[4..8].copy_from_slice(&len.to_le_bytes());
    header[8] = checksum(&header[..8]);
    Ok(header)
}

fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, b| sum.wrapping_add(*b))
}

/// The two kinds of request the printer accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Print an image `width` columns wide.
    Print { width: u32, image: Vec<u8> },
    /// Configure the inserted cassette.
    SetMediaType(u8),
}

impl Request {
    /// The directive sequence of this request, in wire order.
    pub fn directives(&self) -> Result<Vec<Directive>> {
        match self {
            Self::Print { width, image } => Ok(vec![
                Directive::Start,
                Directive::print_data(*width, image.clone())?,
                Directive::FormFeed,
                Directive::Status,
                Directive::End,
            ]),
            Self::SetMediaType(value) => Ok(vec![
                Directive::Start,
                Directive::MediaType(*value),
                Directive::End,
            ]),
        }
    }

    /// Concatenated directive bytes, without header.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let directives = self.directives()?;
        let len = directives.iter().map(Directive::encoded_len).sum();
        let mut body = Vec::with_capacity(len);
        for directive in &directives {
            directive.encode_into(&mut body);
        }
        Ok(body)
    }

    pub fn is_print(&self) -> bool {
        matches!(self, Self::Print { .. })
    }
}

/// A framed request: header plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    header: [u8; HEADER_LEN],
    body: Vec<u8>,
    chunked: bool,
}

impl Payload {
    pub fn new(request: &Request) -> Result<Self> {
        let body = request.encode()?;
        let header = compute_header(body.len())?;
        debug!(
            "framed {} request: {} body bytes, header {:02X?}",
            if request.is_print() { "print" } else { "media type" },
            body.len(),
            header
        );
        Ok(Payload {
            header,
            body,
            chunked: request.is_print(),
        })
    }

    pub fn header(&self) -> &[u8; HEADER_LEN] {
        &self.header
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Header followed by body, as one buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.body.len());
        buf.extend_from_slice(&self.header);
        buf.extend_from_slice(&self.body);
        buf
    }

    /// Split the body into transport chunks of at most `chunk_data_size`
    /// data bytes.
    pub fn chunks(&self, chunk_data_size: usize) -> Result<Vec<Chunk>> {
        chunk::split(&self.body, chunk_data_size)
    }

    /// The GATT writes that deliver this payload, in order.
    ///
    /// Print requests send the header on its own, then each chunk as a
    /// separate write; the printer starts once it sees the trailing magic of
    /// the last chunk. Other requests go out as a single unchunked write.
    pub fn writes(&self, chunk_data_size: usize) -> Result<Vec<Vec<u8>>> {
        if !self.chunked {
            return Ok(vec![self.to_bytes()]);
        }
        let chunks = self.chunks(chunk_data_size)?;
        let mut writes = Vec::with_capacity(1 + chunks.len());
        writes.push(self.header.to_vec());
        writes.extend(chunks.iter().map(Chunk::to_bytes));
        Ok(writes)
    }
}

/// Frame a print request: header, then START, PRINT_DATA, FORM_FEED,
/// STATUS and END.
pub fn build_print_request(width: u32, image: &[u8]) -> Result<Vec<u8>> {
    let request = Request::Print {
        width,
        image: image.to_vec(),
    };
    Ok(Payload::new(&request)?.to_bytes())
}

/// Frame a set-media-type request: header, then START, MEDIA_TYPE and END.
pub fn build_set_media_type(value: u8) -> Result<Vec<u8>> {
    Ok(Payload::new(&Request::SetMediaType(value))?.to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_empty_payload() {
        let header = compute_header(0).unwrap();
        let sum = (0xFFu32 + 0xF0 + 0x12 + 0x34) & 0xFF;
        assert_eq!(
            header,
            [0xFF, 0xF0, 0x12, 0x34, 0x00, 0x00, 0x00, 0x00, sum as u8]
        );
        assert_eq!(header[8], 0x35);
    }

    #[test]
    fn test_header_length_and_checksum() {
        let header = compute_header(0x0201).unwrap();
        assert_eq!(&header[4..8], &[0x01, 0x02, 0x00, 0x00]);
        let sum: u32 = header[..8].iter().map(|&b| b as u32).sum();
        assert_eq!(header[8], (sum % 256) as u8);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_header_too_large() {
        let len = u32::MAX as usize + 1;
        assert_eq!(compute_header(len), Err(Error::PayloadTooLarge(len)));
    }

    #[test]
    fn test_set_media_type() {
        let bytes = build_set_media_type(0x05).unwrap();
        let body = [0x1B, 0x73, 0x9A, 0x02, 0x00, 0x00, 0x1B, 0x4D, 0x05, 0x1B, 0x51];
        assert_eq!(&bytes[9..], &body);
        assert_eq!(&bytes[..9], &compute_header(body.len()).unwrap());
    }

    #[test]
    fn test_print_request_order() {
        let image = vec![0xFF; 4];
        let bytes = build_print_request(1, &image).unwrap();

        let mut body = vec![0x1B, 0x73, 0x9A, 0x02, 0x00, 0x00];
        body.extend_from_slice(&[0x1B, 0x44, 0x01, 0x02, 0x01, 0, 0, 0, 0x20, 0, 0, 0]);
        body.extend_from_slice(&image);
        body.extend_from_slice(&[0x1B, 0x45, 0x1B, 0x41, 0x1B, 0x51]);

        assert_eq!(bytes.len(), 9 + body.len());
        assert_eq!(&bytes[4..8], &(body.len() as u32).to_le_bytes());
        assert_eq!(&bytes[9..], body.as_slice());
    }

    #[test]
    fn test_print_request_rejects_short_image() {
        assert_eq!(
            build_print_request(2, &[0; 4]),
            Err(Error::SizeMismatch {
                expected: 8,
                actual: 4
            })
        );
    }

    #[test]
    fn test_request_directives() {
        let request = Request::SetMediaType(3);
        let commands: Vec<u8> = request
            .directives()
            .unwrap()
            .iter()
            .map(Directive::command)
            .collect();
        assert_eq!(commands, b"sMQ".to_vec());

        let request = Request::Print {
            width: 0,
            image: vec![],
        };
        let commands: Vec<u8> = request
            .directives()
            .unwrap()
            .iter()
            .map(Directive::command)
            .collect();
        assert_eq!(commands, b"sDEAQ".to_vec());
    }

    #[test]
    fn test_writes_for_print() {
        let request = Request::Print {
            width: 1,
            image: vec![0xFF; 4],
        };
        let payload = Payload::new(&request).unwrap();
        let writes = payload.writes(chunk::CHUNK_DATA_SIZE).unwrap();

        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], payload.header().to_vec());
        assert_eq!(writes[1][0], 0);
        assert_eq!(&writes[1][1..writes[1].len() - 2], payload.body());
        assert_eq!(&writes[1][writes[1].len() - 2..], &MAGIC);
    }

    #[test]
    fn test_writes_for_media_type() {
        let payload = Payload::new(&Request::SetMediaType(1)).unwrap();
        let writes = payload.writes(chunk::CHUNK_DATA_SIZE).unwrap();
        assert_eq!(writes, vec![build_set_media_type(1).unwrap()]);
    }
}
