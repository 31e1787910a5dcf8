//! Print status notifications.
//!
//! After a print request the printer notifies `1B 52 <code>` ("ESC R") on the
//! reply characteristic. The codes are not documented and the printer does
//! not always tell the truth: with no cassette inserted it spins its gear and
//! reports [`Status::Success`] rather than [`Status::NoCassette`].

use log::debug;

use crate::directive::ESC;
use crate::error::{Error, Result};

pub const NOTIFICATION_LEN: usize = 3;
pub const RESULT_COMMAND: u8 = b'R';

/// Decoded status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Printing completed, supposedly.
    Success,
    /// Also sent while printing is in progress.
    Printing,
    Failed,
    SuccessLowBattery,
    Cancelled,
    /// Failure sent with a different code than [`Status::Failed`].
    FailedUnknown,
    FailedLowBattery,
    NoCassette,
}

/// How far a [`Status`] can be trusted to mean a label came out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    Maybe,
    Yes,
    YesLowBattery,
    No,
    NoCancelled,
    NoUnknown,
    NoLowBattery,
    NoCassette,
}

impl Confidence {
    /// `Some(true)` if a label was printed, `Some(false)` if not, `None` when
    /// the printer's answer cannot tell.
    pub fn printed(&self) -> Option<bool> {
        match self {
            Self::Maybe => None,
            Self::Yes | Self::YesLowBattery => Some(true),
            _ => Some(false),
        }
    }
}

impl Status {
    /// Decode a notification. It must be exactly `1B 52 <code>` with a code
    /// in `0..=7`.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        match buf {
            [ESC, RESULT_COMMAND, code] => {
                let status = Self::from_code(*code)?;
                debug!("Raw status notification: {:02X?}", buf);
                debug!("Parsed status: {:?}", status);
                Ok(status)
            }
            _ => Err(Error::MalformedNotification(buf.to_vec())),
        }
    }

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Success),
            1 => Ok(Self::Printing),
            2 => Ok(Self::Failed),
            3 => Ok(Self::SuccessLowBattery),
            4 => Ok(Self::Cancelled),
            5 => Ok(Self::FailedUnknown),
            6 => Ok(Self::FailedLowBattery),
            7 => Ok(Self::NoCassette),
            _ => Err(Error::UnknownStatusCode(code)),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Printing => 1,
            Self::Failed => 2,
            Self::SuccessLowBattery => 3,
            Self::Cancelled => 4,
            Self::FailedUnknown => 5,
            Self::FailedLowBattery => 6,
            Self::NoCassette => 7,
        }
    }

    pub fn confidence(&self) -> Confidence {
        match self {
            Self::Success => Confidence::Maybe,
            Self::Printing => Confidence::Yes,
            Self::Failed => Confidence::No,
            Self::SuccessLowBattery => Confidence::YesLowBattery,
            Self::Cancelled => Confidence::NoCancelled,
            Self::FailedUnknown => Confidence::NoUnknown,
            Self::FailedLowBattery => Confidence::NoLowBattery,
            Self::NoCassette => Confidence::NoCassette,
        }
    }

    /// Codes 0 and 1 are also what the printer sends first, when the job is
    /// accepted, before the actual result.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Success | Self::Printing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_low_battery_success() {
        let status = Status::from_bytes(&[0x1B, 0x52, 0x03]).unwrap();
        assert_eq!(status, Status::SuccessLowBattery);
        assert_eq!(status.code(), 3);
        assert_eq!(status.confidence(), Confidence::YesLowBattery);
        assert_eq!(status.confidence().printed(), Some(true));
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(
            Status::from_bytes(&[0x00, 0x52, 0x03]),
            Err(Error::MalformedNotification(vec![0x00, 0x52, 0x03]))
        );
        assert!(matches!(
            Status::from_bytes(&[0x1B, 0x53, 0x03]),
            Err(Error::MalformedNotification(_))
        ));
        assert!(matches!(
            Status::from_bytes(&[0x1B, 0x52]),
            Err(Error::MalformedNotification(_))
        ));
        assert!(matches!(
            Status::from_bytes(&[0x1B, 0x52, 0x00, 0x00]),
            Err(Error::MalformedNotification(_))
        ));
    }

    #[test]
    fn test_decode_unknown_code() {
        assert_eq!(
            Status::from_bytes(&[0x1B, 0x52, 0xFF]),
            Err(Error::UnknownStatusCode(0xFF))
        );
        assert_eq!(Status::from_code(8), Err(Error::UnknownStatusCode(8)));
    }

    #[test]
    fn test_confidence_table() {
        let expected = [
            Confidence::Maybe,
            Confidence::Yes,
            Confidence::No,
            Confidence::YesLowBattery,
            Confidence::NoCancelled,
            Confidence::NoUnknown,
            Confidence::NoLowBattery,
            Confidence::NoCassette,
        ];
        for (code, confidence) in expected.iter().enumerate() {
            let status = Status::from_bytes(&[0x1B, 0x52, code as u8]).unwrap();
            assert_eq!(status.code(), code as u8);
            assert_eq!(status.confidence(), *confidence);
        }
    }

    #[test]
    fn test_in_progress() {
        assert!(Status::Success.is_in_progress());
        assert!(Status::Printing.is_in_progress());
        assert!(!Status::Failed.is_in_progress());
        assert_eq!(Confidence::Maybe.printed(), None);
        assert_eq!(Confidence::NoCassette.printed(), Some(false));
    }
}
