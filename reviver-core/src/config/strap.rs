//! Strap pin decoding
//!
//! Three input lines form a binary number: the first line is the LSB
//! (value 1), the third the MSB (value 4).

use reviver_hal::InputPin;

/// Number of strap lines
pub const STRAP_LINES: usize = 3;

/// Number of distinct selector values
pub const SELECTOR_COUNT: u8 = 1 << STRAP_LINES;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Raw strap value does not fit in three bits
    SelectorOutOfRange(u8),
}

/// Validated strap selector (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StrapSelector(u8);

impl StrapSelector {
    /// Every selector, in table order
    pub const ALL: [StrapSelector; SELECTOR_COUNT as usize] = [
        StrapSelector(0),
        StrapSelector(1),
        StrapSelector(2),
        StrapSelector(3),
        StrapSelector(4),
        StrapSelector(5),
        StrapSelector(6),
        StrapSelector(7),
    ];

    /// Validate a raw strap value
    ///
    /// Never clamps or defaults: anything outside 0-7 is an error the
    /// caller must treat as fatal.
    pub const fn from_bits(bits: u8) -> Result<Self, ConfigError> {
        if bits < SELECTOR_COUNT {
            Ok(Self(bits))
        } else {
            Err(ConfigError::SelectorOutOfRange(bits))
        }
    }

    /// Build a selector from the three line levels
    pub const fn from_lines(lsb: bool, mid: bool, msb: bool) -> Self {
        Self((lsb as u8) | ((mid as u8) << 1) | ((msb as u8) << 2))
    }

    /// Table index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw 3-bit strap value
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StrapSelector {
    type Error = ConfigError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

/// Sample the strap lines once, LSB first
pub fn read_selector<P: InputPin>(lines: &[P; STRAP_LINES]) -> Result<StrapSelector, ConfigError> {
    let bits = lines
        .iter()
        .enumerate()
        .fold(0u8, |bits, (i, line)| bits | ((line.is_high() as u8) << i));
    StrapSelector::from_bits(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockInput;

    #[test]
    fn test_from_bits_accepts_three_bit_values() {
        for bits in 0..8u8 {
            assert_eq!(StrapSelector::from_bits(bits).map(|s| s.bits()), Ok(bits));
        }
    }

    #[test]
    fn test_from_bits_rejects_out_of_range() {
        assert_eq!(
            StrapSelector::from_bits(8),
            Err(ConfigError::SelectorOutOfRange(8))
        );
        assert_eq!(
            StrapSelector::try_from(0xFF),
            Err(ConfigError::SelectorOutOfRange(0xFF))
        );
    }

    #[test]
    fn test_line_weights() {
        assert_eq!(StrapSelector::from_lines(true, false, false).bits(), 1);
        assert_eq!(StrapSelector::from_lines(false, true, false).bits(), 2);
        assert_eq!(StrapSelector::from_lines(false, false, true).bits(), 4);
        assert_eq!(StrapSelector::from_lines(true, true, true).bits(), 7);
    }

    #[test]
    fn test_read_selector_from_pins() {
        let lines = [MockInput::new(true), MockInput::new(false), MockInput::new(true)];
        assert_eq!(read_selector(&lines), Ok(StrapSelector::from_lines(true, false, true)));
        assert_eq!(read_selector(&lines).map(|s| s.bits()), Ok(5));
    }
}
