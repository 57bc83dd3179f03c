//! Wide-character name fields.
//!
//! RWD names are arrays of 16-bit code units. They are _not_ decoded as UTF-16: each unit is
//! widened directly to a code point, and anything that isn't a valid scalar value comes out as
//! U+FFFD. Surrogate pairs are therefore not joined. Existing archives and tools rely on this
//! exact mapping, so changing it to a proper UTF-16 decode would be a compatibility break.

/// Widen an unsigned code unit to a char.
pub fn unit_to_char(unit: u16) -> char {
	char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Widen a signed code unit to a char.
///
/// The unit is sign-extended, so any unit with the top bit set is replaced.
pub fn signed_unit_to_char(unit: i16) -> char {
	u32::try_from(unit)
		.ok()
		.and_then(char::from_u32)
		.unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Decode a fixed-width name field, using only the first `length` units.
pub fn decode_counted(units: &[u16], length: usize) -> String {
	units.iter().take(length).copied().map(unit_to_char).collect()
}

/// Decode a zero-terminated name field.
///
/// Stops at the first zero unit, or at the end of the field if there is none.
pub fn decode_zero_terminated(units: &[u16]) -> String {
	units
		.iter()
		.copied()
		.take_while(|unit| *unit != 0)
		.map(unit_to_char)
		.collect()
}

/// Decode a directory name.
pub fn decode_signed(units: &[i16]) -> String {
	units.iter().copied().map(signed_unit_to_char).collect()
}

/// Encode a name to signed code units.
///
/// Each char is truncated to its low 16 bits, which round-trips every name that
/// [`decode_signed`] can produce without replacement. Archives never need this, as saving writes
/// back the units that were read.
#[cfg(test)]
pub(crate) fn encode_signed(name: &str) -> Vec<i16> {
	name.chars().map(|ch| (u32::from(ch) as u16) as i16).collect()
}
