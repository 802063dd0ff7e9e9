//! Accelerometer readings carried by a frame

/// Converter resolution in bits
pub const READING_BITS: u32 = 10;

/// Largest value a reading can take
pub const READING_MAX: u16 = (1 << READING_BITS) - 1;

/// Accelerometer axis, in frame order
///
/// The converter walks its channels from the highest-numbered one down, and
/// the sensor's Z output sits on the highest channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    Z,
    Y,
    X,
}

impl Axis {
    /// All axes in the order they appear in a frame
    pub const FRAME_ORDER: [Axis; 3] = [Axis::Z, Axis::Y, Axis::X];

    /// Position of this axis within a frame
    pub fn index(self) -> usize {
        match self {
            Axis::Z => 0,
            Axis::Y => 1,
            Axis::X => 2,
        }
    }

    /// Axis stored at a frame position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::FRAME_ORDER.get(index).copied()
    }
}

/// A single 10-bit converter reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading(u16);

impl Reading {
    /// Wrap a raw value, or `None` if it does not fit in 10 bits
    pub fn new(raw: u16) -> Option<Self> {
        (raw <= READING_MAX).then_some(Self(raw))
    }

    /// Raw converter counts
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Input voltage in millivolts for a given positive reference
    ///
    /// The converter maps `0..=Vref` onto `0..=1023`, so
    /// `Vin = N · Vref / 1023`. Rounded to the nearest millivolt.
    pub fn to_millivolts(self, vref_mv: u32) -> u32 {
        let max = READING_MAX as u32;
        (self.0 as u32 * vref_mv + max / 2) / max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_range() {
        assert_eq!(Reading::new(0).map(Reading::raw), Some(0));
        assert_eq!(Reading::new(1023).map(Reading::raw), Some(1023));
        assert_eq!(Reading::new(1024), None);
    }

    #[test]
    fn test_millivolts_full_scale() {
        let full = Reading::new(READING_MAX).unwrap();
        assert_eq!(full.to_millivolts(3600), 3600);
        let zero = Reading::new(0).unwrap();
        assert_eq!(zero.to_millivolts(3600), 0);
    }

    #[test]
    fn test_millivolts_midscale() {
        // 512 counts at 3.6 V reference is ~1.8 V
        let mid = Reading::new(512).unwrap();
        assert_eq!(mid.to_millivolts(3600), 1802);
    }

    #[test]
    fn test_axis_frame_order() {
        for (i, axis) in Axis::FRAME_ORDER.iter().enumerate() {
            assert_eq!(axis.index(), i);
            assert_eq!(Axis::from_index(i), Some(*axis));
        }
        assert_eq!(Axis::from_index(3), None);
    }
}
