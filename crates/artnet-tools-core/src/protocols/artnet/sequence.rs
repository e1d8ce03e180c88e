/// Steps below the wrap point within which an older-looking sequence is
/// still accepted as a rollover.
pub const SEQUENCE_ROLLOVER_TOLERANCE: u8 = 30;

const SEQUENCE_MIN: u8 = 0x01;
const SEQUENCE_MAX: u8 = 0xff;

/// Drops stale ArtDMX frames based on the sequence byte.
///
/// Sequence 0 means the sender does not track sequences and is always
/// accepted. Otherwise a sequence that is not newer than the previous one is
/// dropped, unless it sits at the start of the range while the previous one
/// sits at the end (a wrap-around).
#[derive(Debug, Default, Clone)]
pub struct SequenceFilter {
    previous: u8,
}

impl SequenceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the frame should be applied.
    pub fn accept(&mut self, sequence: u8) -> bool {
        if sequence > 0 && sequence <= self.previous {
            let early_in_range = sequence <= SEQUENCE_ROLLOVER_TOLERANCE + SEQUENCE_MIN;
            let late_previous = self.previous >= SEQUENCE_MAX - SEQUENCE_ROLLOVER_TOLERANCE;
            if !(early_in_range && late_previous) {
                return false;
            }
        }
        self.previous = sequence;
        true
    }
}
