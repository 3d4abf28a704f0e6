//! # Playback Sessions
//!
//! A session ties one byte stream to one surface:
//!
//! 1. `Player::open()` creates the surface through a caller-supplied opener
//! 2. `feed()`, `play()` or `play_reader()` push bytes through the decoder and
//!    dispatch every resolved instruction
//! 3. `finish()` closes the surface and returns a [`PlaybackReport`]
//!
//! The free functions [`play`] and [`play_reader`] close the surface exactly
//! once, including when a read error or decode fault ends the session early.
//! A [`Player`] driven by hand must be finished the same way; dropping it
//! leaves the surface open.

use std::io::{self, BufReader, Read};

use log::{debug, trace, warn};

use crate::decoder::{Decoder, Fault, Instruction};
use crate::dispatch::dispatch;
use crate::surface::{Surface, SurfaceError};
use crate::{DecodeError, Plotter};

/// Options controlling a playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOptions {
    /// Width passed to the surface opener.
    pub width: u32,

    /// Height passed to the surface opener.
    pub height: u32,

    /// Milliseconds per pause tick.
    pub pause_unit_ms: u64,

    /// Whether a decode fault ends the session.
    ///
    /// When false the fault is logged, recorded in the report and skipped.
    pub halt_on_fault: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            pause_unit_ms: 10,
            halt_on_fault: true,
        }
    }
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaybackReport {
    /// Bytes consumed from the stream
    pub bytes_read: usize,

    /// Instructions dispatched
    pub instructions: usize,

    /// Faults skipped (only when `halt_on_fault` is false)
    pub faults: Vec<Fault>,

    /// Whether the stream ended mid-instruction
    pub truncated: bool,
}

/// Errors that end a playback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The surface could not be opened or closed.
    Surface(SurfaceError),

    /// The byte source failed.
    Io {
        /// Kind of the underlying I/O error
        kind: io::ErrorKind,
        /// Message of the underlying I/O error
        message: String,
    },

    /// A byte could not be decoded and `halt_on_fault` is set.
    Decode {
        /// Offset of the offending byte in the stream
        offset: usize,
        /// The decode fault
        source: DecodeError,
    },
}

impl std::fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PlaybackError::Surface(err) => write!(f, "Surface error: {}", err),
            PlaybackError::Io { message, .. } => write!(f, "Read error: {}", message),
            PlaybackError::Decode { offset, source } => {
                write!(f, "Decode error at byte {}: {}", offset, source)
            }
        }
    }
}

impl std::error::Error for PlaybackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlaybackError::Surface(err) => Some(err),
            PlaybackError::Io { .. } => None,
            PlaybackError::Decode { source, .. } => Some(source),
        }
    }
}

impl From<SurfaceError> for PlaybackError {
    fn from(err: SurfaceError) -> Self {
        PlaybackError::Surface(err)
    }
}

impl From<io::Error> for PlaybackError {
    fn from(err: io::Error) -> Self {
        PlaybackError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Plays a sketch byte stream against a surface.
///
/// # Type Parameters
///
/// * `S` - Surface implementation (must implement `Surface` trait)
///
/// # Examples
///
/// ```
/// use sketchplot::{PlaybackOptions, Player, RecordingSurface, SurfaceCall};
///
/// let mut player =
///     Player::open("clear", PlaybackOptions::default(), RecordingSurface::open).unwrap();
///
/// // Extended clear with no operand
/// player.feed(0xC4).unwrap();
///
/// let (surface, report) = player.finish().unwrap();
/// assert_eq!(report.instructions, 1);
/// assert_eq!(surface.calls()[1], SurfaceCall::Clear);
/// assert!(surface.is_closed());
/// ```
#[must_use = "a player leaves its surface open until `finish()` is called"]
pub struct Player<S: Surface> {
    decoder: Decoder,
    plotter: Plotter,
    surface: S,
    options: PlaybackOptions,
    report: PlaybackReport,
}

impl<S: Surface> Player<S> {
    /// Opens a session.
    ///
    /// `open` receives the session name and the configured width and height.
    /// An opener failure is returned as [`PlaybackError::Surface`].
    pub fn open<F>(name: &str, options: PlaybackOptions, open: F) -> Result<Self, PlaybackError>
    where
        F: FnOnce(&str, u32, u32) -> Result<S, SurfaceError>,
    {
        let surface = open(name, options.width, options.height)?;
        debug!(
            "Opened surface '{}' ({}x{})",
            name, options.width, options.height
        );

        Ok(Self::with_surface(surface, options))
    }

    /// Starts a session on a surface that is already open.
    pub fn with_surface(surface: S, options: PlaybackOptions) -> Self {
        Self {
            decoder: Decoder::new(),
            plotter: Plotter::new(),
            surface,
            options,
            report: PlaybackReport::default(),
        }
    }

    /// Feeds one byte, dispatching the instruction it completes, if any.
    ///
    /// A decode fault is returned only when `halt_on_fault` is set. The
    /// surface stays open after any error; call `finish()` to close it.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Instruction>, PlaybackError> {
        let offset = self.report.bytes_read;
        self.report.bytes_read += 1;

        match self.decoder.decode_byte(byte) {
            Ok(Some(instr)) => {
                trace!("{:>6}: {}", offset, instr);
                dispatch(&mut self.plotter, &instr, &mut self.surface, &self.options);
                self.report.instructions += 1;
                Ok(Some(instr))
            }
            Ok(None) => Ok(None),
            Err(error) if self.options.halt_on_fault => Err(PlaybackError::Decode {
                offset,
                source: error,
            }),
            Err(error) => {
                warn!("Skipping byte {}: {}", offset, error);
                self.report.faults.push(Fault { offset, error });
                Ok(None)
            }
        }
    }

    /// Feeds every byte of a slice.
    ///
    /// Stops at the first error. The surface stays open either way.
    pub fn play(&mut self, bytes: &[u8]) -> Result<(), PlaybackError> {
        for &byte in bytes {
            self.feed(byte)?;
        }
        Ok(())
    }

    /// Feeds every byte from a reader until end of stream.
    ///
    /// The reader is buffered internally. Stops at the first error. The
    /// surface stays open either way.
    pub fn play_reader<R: Read>(&mut self, reader: R) -> Result<(), PlaybackError> {
        for byte in BufReader::new(reader).bytes() {
            self.feed(byte?)?;
        }
        Ok(())
    }

    /// Ends the session and closes the surface.
    ///
    /// An instruction still in flight is dropped and reported as truncated.
    pub fn finish(mut self) -> Result<(S, PlaybackReport), PlaybackError> {
        if !self.decoder.is_idle() {
            debug!(
                "Stream ended mid-instruction ({:?}); dropping it",
                self.decoder.state()
            );
            self.report.truncated = true;
            self.decoder.reset();
        }

        self.surface.close()?;
        debug!(
            "Closed surface after {} bytes, {} instructions",
            self.report.bytes_read, self.report.instructions
        );

        Ok((self.surface, self.report))
    }

    /// Closes the surface after playback stopped on an error.
    ///
    /// The playback error is what the caller sees, so a close failure here is
    /// logged rather than returned.
    fn abandon(mut self) {
        match self.surface.close() {
            Ok(()) => debug!(
                "Closed surface after error at byte {}",
                self.report.bytes_read
            ),
            Err(err) => warn!("Closing surface after error: {}", err),
        }
    }

    /// Returns the pen state.
    pub fn plotter(&self) -> &Plotter {
        &self.plotter
    }

    /// Returns the decoder.
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Returns the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the session options.
    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    /// Returns the report so far.
    pub fn report(&self) -> &PlaybackReport {
        &self.report
    }
}

/// Plays a complete byte slice in one session.
///
/// Opens the surface, feeds every byte and closes the surface. If playback
/// stops on an error the surface is still closed and the playback error is
/// returned; a close failure at that point is logged as a warning.
///
/// # Examples
///
/// ```
/// use sketchplot::{play, PlaybackOptions, RecordingSurface};
///
/// let (surface, report) =
///     play("pause", &[0x85], PlaybackOptions::default(), RecordingSurface::open).unwrap();
/// assert_eq!(report.bytes_read, 1);
/// assert!(surface.is_closed());
/// ```
pub fn play<S, F>(
    name: &str,
    bytes: &[u8],
    options: PlaybackOptions,
    open: F,
) -> Result<(S, PlaybackReport), PlaybackError>
where
    S: Surface,
    F: FnOnce(&str, u32, u32) -> Result<S, SurfaceError>,
{
    let mut player = Player::open(name, options, open)?;
    if let Err(err) = player.play(bytes) {
        player.abandon();
        return Err(err);
    }
    player.finish()
}

/// Plays a complete reader in one session.
///
/// Same contract as [`play`].
pub fn play_reader<S, F, R>(
    name: &str,
    reader: R,
    options: PlaybackOptions,
    open: F,
) -> Result<(S, PlaybackReport), PlaybackError>
where
    S: Surface,
    F: FnOnce(&str, u32, u32) -> Result<S, SurfaceError>,
    R: Read,
{
    let mut player = Player::open(name, options, open)?;
    if let Err(err) = player.play_reader(reader) {
        player.abandon();
        return Err(err);
    }
    player.finish()
}
