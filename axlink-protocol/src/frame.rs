//! Frame encoding and decoding.
//!
//! Frame format:
//! - 3 samples, acquisition order
//! - each sample: HIGH byte, then LOW byte
//! - no delimiter, no checksum

use crate::reading::READING_MAX;

/// Samples carried by one frame
pub const SAMPLES_PER_FRAME: usize = 3;

/// Bytes per frame (2 per sample)
pub const FRAME_LEN: usize = SAMPLES_PER_FRAME * 2;

/// Errors that can occur while decoding frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Fewer than `FRAME_LEN` bytes available
    BufferTooSmall,
    /// A sample has bits set above the 10-bit reading range
    ReadingOutOfRange {
        /// Position of the sample within the frame
        index: u8,
        /// Decoded value
        value: u16,
    },
}

/// Encode one cycle's samples into a frame
pub fn encode(samples: &[u16; SAMPLES_PER_FRAME]) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    for (chunk, sample) in frame.chunks_exact_mut(2).zip(samples) {
        chunk.copy_from_slice(&sample.to_be_bytes());
    }
    frame
}

/// Decode a frame back into its samples
///
/// Values are returned exactly as transmitted; see [`decode_checked`] for a
/// variant that rejects values a 10-bit converter cannot produce.
pub fn decode(frame: &[u8; FRAME_LEN]) -> [u16; SAMPLES_PER_FRAME] {
    let mut samples = [0u16; SAMPLES_PER_FRAME];
    for (sample, chunk) in samples.iter_mut().zip(frame.chunks_exact(2)) {
        *sample = u16::from_be_bytes([chunk[0], chunk[1]]);
    }
    samples
}

/// Decode the first frame of `bytes`, rejecting out-of-range readings
///
/// An out-of-range reading is the usual symptom of a receiver that has lost
/// byte alignment (a low byte landed in a high-byte slot).
pub fn decode_checked(bytes: &[u8]) -> Result<[u16; SAMPLES_PER_FRAME], FrameError> {
    let frame: &[u8; FRAME_LEN] = bytes
        .get(..FRAME_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(FrameError::BufferTooSmall)?;

    let samples = decode(frame);
    for (index, &value) in samples.iter().enumerate() {
        if value > READING_MAX {
            return Err(FrameError::ReadingOutOfRange {
                index: index as u8,
                value,
            });
        }
    }
    Ok(samples)
}

/// Streaming decoder for the serial byte stream
///
/// Collects bytes and yields one set of samples every `FRAME_LEN` bytes.
/// Alignment is purely positional: the decoder assumes the first byte it is
/// fed is the high byte of sample 0.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    buffer: [u8; FRAME_LEN],
    filled: usize,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Create a new decoder aligned to a frame boundary
    pub const fn new() -> Self {
        Self {
            buffer: [0u8; FRAME_LEN],
            filled: 0,
        }
    }

    /// Drop any partial frame and realign to the next byte
    pub fn reset(&mut self) {
        self.filled = 0;
    }

    /// Number of bytes of the current partial frame
    pub fn pending(&self) -> usize {
        self.filled
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Some(samples)` when the byte completes a frame.
    pub fn feed(&mut self, byte: u8) -> Option<[u16; SAMPLES_PER_FRAME]> {
        self.buffer[self.filled] = byte;
        self.filled += 1;

        if self.filled < FRAME_LEN {
            return None;
        }

        self.filled = 0;
        Some(decode(&self.buffer))
    }

    /// Feed multiple bytes to the decoder
    ///
    /// Returns the first complete frame found, if any, and the number of bytes
    /// consumed. Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (Option<[u16; SAMPLES_PER_FRAME]>, usize) {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(samples) = self.feed(byte) {
                return (Some(samples), i + 1);
            }
        }
        (None, bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_known_readings() {
        let frame = encode(&[300, 512, 1023]);
        assert_eq!(frame, [0x01, 0x2C, 0x02, 0x00, 0x03, 0xFF]);
    }

    #[test]
    fn test_encode_high_byte_carries_top_bits() {
        // Bits 8-9 of a 10-bit reading land in the high byte
        let frame = encode(&[0x0300, 0x0100, 0x00FF]);
        assert_eq!(frame[0], 0x03);
        assert_eq!(frame[2], 0x01);
        assert_eq!(frame[4], 0x00);
        assert_eq!(frame[5], 0xFF);
    }

    #[test]
    fn test_decode_known_frame() {
        let samples = decode(&[0x01, 0x2C, 0x02, 0x00, 0x03, 0xFF]);
        assert_eq!(samples, [300, 512, 1023]);
    }

    #[test]
    fn test_decode_checked_short_buffer() {
        assert_eq!(
            decode_checked(&[0x01, 0x2C, 0x02]),
            Err(FrameError::BufferTooSmall)
        );
    }

    #[test]
    fn test_decode_checked_rejects_misaligned_stream() {
        // Stream picked up one byte late: low byte 0x2C read as a high byte
        let stream = [0x2C, 0x02, 0x00, 0x03, 0xFF, 0x01];
        assert_eq!(
            decode_checked(&stream),
            Err(FrameError::ReadingOutOfRange {
                index: 0,
                value: 0x2C02
            })
        );
    }

    #[test]
    fn test_decoder_yields_every_six_bytes() {
        let mut decoder = FrameDecoder::new();
        let mut stream = heapless::Vec::<u8, 12>::new();
        stream.extend_from_slice(&encode(&[1, 2, 3])).unwrap();
        stream.extend_from_slice(&encode(&[4, 5, 6])).unwrap();

        let (first, used) = decoder.feed_bytes(&stream);
        assert_eq!(first, Some([1, 2, 3]));
        assert_eq!(used, FRAME_LEN);

        let (second, used) = decoder.feed_bytes(&stream[FRAME_LEN..]);
        assert_eq!(second, Some([4, 5, 6]));
        assert_eq!(used, FRAME_LEN);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_decoder_partial_frame() {
        let mut decoder = FrameDecoder::new();
        let (result, used) = decoder.feed_bytes(&[0x01, 0x2C, 0x02]);
        assert_eq!(result, None);
        assert_eq!(used, 3);
        assert_eq!(decoder.pending(), 3);
    }

    #[test]
    fn test_decoder_dropped_byte_desynchronises() {
        let mut decoder = FrameDecoder::new();
        let first = encode(&[300, 512, 1023]);
        let second = encode(&[300, 512, 1023]);

        // Lose the first byte of the stream
        assert_eq!(decoder.feed_bytes(&first[1..]).0, None);
        let (shifted, _) = decoder.feed_bytes(&second);
        assert_ne!(shifted, Some([300, 512, 1023]));

        // Only an explicit reset realigns
        decoder.reset();
        assert_eq!(decoder.feed_bytes(&second).0, Some([300, 512, 1023]));
    }

    proptest! {
        #[test]
        fn prop_frame_roundtrip(samples in prop::array::uniform3(0u16..=READING_MAX)) {
            let frame = encode(&samples);
            prop_assert_eq!(decode(&frame), samples);
            prop_assert_eq!(decode_checked(&frame), Ok(samples));
        }

        #[test]
        fn prop_upper_six_bits_zero(samples in prop::array::uniform3(0u16..=READING_MAX)) {
            let frame = encode(&samples);
            for high in frame.iter().step_by(2) {
                prop_assert_eq!(high & 0xFC, 0);
            }
        }
    }
}
