//! MIDI realtime transport parsing.
//!
//! Only three System Realtime messages matter to the sequencer. Realtime
//! messages are single status bytes that may be interleaved anywhere in the
//! stream (even between the data bytes of another message), so no running
//! status or message framing is needed: every byte is classified on its own.

/// Timing Clock, sent 24 times per quarter note.
pub const TIMING_CLOCK: u8 = 0xF8;
/// Start.
pub const START: u8 = 0xFA;
/// Continue (ignored; the sequencer only restarts from step 0).
pub const CONTINUE: u8 = 0xFB;
/// Stop.
pub const STOP: u8 = 0xFC;

/// A transport primitive delivered by the MIDI input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportEvent {
    /// One clock tick.
    Tick,
    /// Start from the top.
    Start,
    /// Halt.
    Stop,
}

/// Classify a single byte from the MIDI input.
///
/// # Examples
///
/// ```
/// use stepseq::midi::{parse_realtime, TransportEvent};
///
/// assert_eq!(parse_realtime(0xF8), Some(TransportEvent::Tick));
/// assert_eq!(parse_realtime(0x90), None); // Note On status
/// ```
pub fn parse_realtime(byte: u8) -> Option<TransportEvent> {
    match byte {
        TIMING_CLOCK => Some(TransportEvent::Tick),
        START => Some(TransportEvent::Start),
        STOP => Some(TransportEvent::Stop),
        _ => None,
    }
}

/// Byte-at-a-time transport parser with diagnostic counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidiTransportParser {
    events: u32,
    ignored: u32,
}

impl MidiTransportParser {
    /// Fresh parser with zeroed counters.
    pub const fn new() -> Self {
        Self {
            events: 0,
            ignored: 0,
        }
    }

    /// Feed one received byte.
    pub fn feed(&mut self, byte: u8) -> Option<TransportEvent> {
        let event = parse_realtime(byte);
        if event.is_some() {
            self.events = self.events.wrapping_add(1);
        } else {
            self.ignored = self.ignored.wrapping_add(1);
        }
        event
    }

    /// Number of transport events recognised so far.
    pub fn events(&self) -> u32 {
        self.events
    }

    /// Number of bytes that were not transport events.
    pub fn ignored(&self) -> u32 {
        self.ignored
    }
}
