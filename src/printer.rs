use log::{debug, info};

use crate::{
    canvas::Canvas,
    chunk::CHUNK_DATA_SIZE,
    error::{Error, Result},
    payload::{Payload, Request},
    status::Status,
};

/// BLE link to a printer.
///
/// Implementations own the GATT connection: `write` performs one write with
/// response on the print request characteristic and returns once the write
/// has completed, `read_notification` blocks until the next value arrives on
/// the print reply characteristic.
pub trait Transport {
    fn write(&mut self, buf: &[u8]) -> Result<()>;
    fn read_notification(&mut self) -> Result<Vec<u8>>;
}

/// Print job settings.
///
/// Transforms are applied in the order stretch, padding, invert, the same as
/// the vendor app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    stretch: u32,
    padding: u32,
    invert: bool,
    chunk_data_size: usize,
    max_notifications: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Initialize configuration data with default values.
    ///
    /// Images are stretched by 2 since unstretched labels come out too thin
    /// to read.
    ///
    /// # Example
    ///
    /// ```
    /// use letratag::Config;
    ///
    /// let config = Config::new().stretch(3).padding(4).invert(true);
    /// ```
    pub fn new() -> Config {
        Config {
            stretch: 2,
            padding: 0,
            invert: false,
            chunk_data_size: CHUNK_DATA_SIZE,
            max_notifications: 4,
        }
    }

    pub fn stretch(self, factor: u32) -> Self {
        Config {
            stretch: factor,
            ..self
        }
    }

    /// Blank columns added on both sides, after stretching.
    pub fn padding(self, columns: u32) -> Self {
        Config {
            padding: columns,
            ..self
        }
    }

    pub fn invert(self, flag: bool) -> Self {
        Config {
            invert: flag,
            ..self
        }
    }

    pub fn chunk_data_size(self, size: usize) -> Self {
        Config {
            chunk_data_size: size,
            ..self
        }
    }

    /// Notifications read after a print before giving up on a final status.
    pub fn max_notifications(self, count: usize) -> Self {
        Config {
            max_notifications: count,
            ..self
        }
    }

    fn build(&self, canvas: &Canvas) -> Result<Canvas> {
        let mut canvas = canvas.stretch(self.stretch)?;
        if self.padding != 0 {
            canvas = canvas.fill(self.padding, self.padding)?;
        }
        if self.invert {
            canvas = canvas.invert();
        }
        debug!("{:?}", self);
        Ok(canvas)
    }
}

pub struct Printer<T: Transport> {
    transport: T,
    config: Config,
}

impl<T: Transport> Printer<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Printer { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Print a label and wait for its result.
    ///
    /// The whole request is encoded before anything is written, so an
    /// encoding error never leaves a half-sent job on the printer. The header
    /// goes out first, then each chunk in order.
    pub fn print(&mut self, canvas: &Canvas) -> Result<Status> {
        let canvas = self.config.build(canvas)?;
        let request = Request::Print {
            width: canvas.width(),
            image: canvas.serialize(),
        };
        let writes = Payload::new(&request)?.writes(self.config.chunk_data_size)?;

        info!(
            "printing {}x{} label in {} writes",
            canvas.width(),
            canvas.height(),
            writes.len()
        );
        for buf in &writes {
            self.write(buf)?;
        }

        let status = self.read_status()?;
        info!("print finished with {:?}", status);
        Ok(status)
    }

    /// Send a set-media-type request.
    ///
    /// The printer does not answer this request, so nothing is read back.
    pub fn set_media_type(&mut self, value: u8) -> Result<()> {
        let payload = Payload::new(&Request::SetMediaType(value))?;
        let writes = payload.writes(self.config.chunk_data_size)?;
        for buf in &writes {
            self.write(buf)?;
        }
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> Result<()> {
        debug!("write {} bytes", buf.len());
        self.transport.write(buf)
    }

    /// Read notifications until the final status of the job arrives.
    ///
    /// The printer first acknowledges the job with an in-progress code and
    /// only then sends the result, so the first in-progress notification is
    /// dropped.
    fn read_status(&mut self) -> Result<Status> {
        let mut discarded = false;

        for _ in 0..self.config.max_notifications {
            let buf = self.transport.read_notification()?;
            let status = Status::from_bytes(&buf)?;
            if !discarded && status.is_in_progress() {
                debug!("discard acknowledgement {:?}", status);
                discarded = true;
                continue;
            }
            return Ok(status);
        }
        Err(Error::NoFinalStatus(self.config.max_notifications))
    }
}
