//! Local audio playback of synthesized speech via `rodio`.
//!
//! `rodio`'s `OutputStream` is tied to the thread that created it, so
//! [`RodioPlayback`] runs a dedicated playback thread and hands audio to it
//! over a channel.  Each buffer is decoded into a transient `Sink`; the sink
//! is dropped exactly once, when playback of that buffer ends.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::mpsc;

use crate::speech::client::SpeechError;

// ---------------------------------------------------------------------------
// Playback trait
// ---------------------------------------------------------------------------

/// Sink for synthesized audio bytes.
///
/// `play` hands the bytes off and returns immediately; actual playback is
/// asynchronous from the caller's perspective.
pub trait Playback: Send + Sync {
    fn play(&self, audio: Vec<u8>) -> Result<(), SpeechError>;
}

// Compile-time assertion: Box<dyn Playback> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Playback>) {}
};

// ---------------------------------------------------------------------------
// RodioPlayback
// ---------------------------------------------------------------------------

/// Plays `audio/mpeg` buffers on the default output device.
pub struct RodioPlayback {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl RodioPlayback {
    /// Spawn the playback thread and open the default output device.
    ///
    /// Fails with [`SpeechError::Output`] when no output device is available
    /// — callers typically degrade to [`NullPlayback`] in that case.
    pub fn spawn() -> Result<Self, SpeechError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<(), String>>();

        std::thread::Builder::new()
            .name("speech-playback".into())
            .spawn(move || {
                // The stream must live on this thread for as long as audio
                // may play.
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => {
                        let _ = ready_tx.send(Ok(()));
                        pair
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };

                while let Some(bytes) = rx.blocking_recv() {
                    let source = match Decoder::new(Cursor::new(bytes)) {
                        Ok(source) => source,
                        Err(e) => {
                            log::warn!("playback: undecodable audio buffer: {e}");
                            continue;
                        }
                    };

                    let sink = match Sink::try_new(&handle) {
                        Ok(sink) => sink,
                        Err(e) => {
                            log::warn!("playback: could not open sink: {e}");
                            continue;
                        }
                    };

                    sink.append(source);
                    sink.sleep_until_end();
                    // Dropping the sink here releases the transient playback
                    // resource, once, after the end of playback.
                    drop(sink);
                    log::debug!("playback: finished, sink released");
                }

                log::info!("playback: channel closed, playback thread exiting");
            })
            .map_err(|e| SpeechError::Output(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self { tx }),
            Ok(Err(msg)) => Err(SpeechError::Output(msg)),
            Err(_) => Err(SpeechError::Output("playback thread died during startup".into())),
        }
    }
}

impl Playback for RodioPlayback {
    fn play(&self, audio: Vec<u8>) -> Result<(), SpeechError> {
        self.tx
            .send(audio)
            .map_err(|_| SpeechError::Output("playback thread terminated".into()))
    }
}

// ---------------------------------------------------------------------------
// NullPlayback
// ---------------------------------------------------------------------------

/// Discards audio.  Used when no output device is present so the rest of the
/// application keeps working.
pub struct NullPlayback;

impl Playback for NullPlayback {
    fn play(&self, audio: Vec<u8>) -> Result<(), SpeechError> {
        log::info!("playback unavailable — discarding {} audio bytes", audio.len());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
