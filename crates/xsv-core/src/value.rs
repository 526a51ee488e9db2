//! Scalar coercion between field text and typed values
//!
//! Booleans and numbers are lenient: text that does not parse becomes the
//! type's zero value. Enumerations and flag sets are strict and report
//! [`Error::InvalidValue`] for names they do not declare.

use crate::error::{Error, Result};

/// A value that can be read from and written to a single field
pub trait FieldValue: Sized {
    /// Convert field text into a value
    fn from_field(raw: &str) -> Result<Self>;

    /// Textual form written back into a field
    fn to_field(&self) -> String;
}

impl FieldValue for String {
    fn from_field(raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }

    fn to_field(&self) -> String {
        self.clone()
    }
}

impl FieldValue for bool {
    /// `true`/`false` in any case, surrounding whitespace ignored
    fn from_field(raw: &str) -> Result<Self> {
        Ok(raw.trim().eq_ignore_ascii_case("true"))
    }

    fn to_field(&self) -> String {
        let text = if *self { "True" } else { "False" };
        text.to_string()
    }
}

macro_rules! lenient_number {
    ($($t:ty),*) => {
        $(
            impl FieldValue for $t {
                fn from_field(raw: &str) -> Result<Self> {
                    Ok(raw.trim().parse().unwrap_or_default())
                }

                fn to_field(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

lenient_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// A single-valued enumeration addressed by member name
///
/// Implementors list their members once and usually forward
/// [`FieldValue`] to [`parse_enum`] and [`enum_name`].
pub trait FieldEnum: Sized + Copy + PartialEq + 'static {
    /// Name used in error messages
    const TYPE_NAME: &'static str;
    /// Declared members in declaration order
    const MEMBERS: &'static [(&'static str, Self)];
}

/// Resolve a member name, ignoring case and surrounding whitespace
pub fn parse_enum<E: FieldEnum>(raw: &str) -> Result<E> {
    let name = raw.trim();
    E::MEMBERS
        .iter()
        .find(|(member, _)| member.eq_ignore_ascii_case(name))
        .map(|(_, value)| *value)
        .ok_or_else(|| Error::InvalidValue {
            type_name: E::TYPE_NAME,
            value: raw.to_string(),
        })
}

/// Declared name of an enumeration value
pub fn enum_name<E: FieldEnum>(value: &E) -> String {
    E::MEMBERS
        .iter()
        .find(|(_, member)| member == value)
        .map(|(name, _)| name.to_string())
        .unwrap_or_default()
}

/// A bit-set enumeration whose text is a comma-joined list of member names
pub trait FieldFlags: Sized + 'static {
    /// Name used in error messages
    const TYPE_NAME: &'static str;
    /// Declared members and their bits, in ascending order
    const MEMBERS: &'static [(&'static str, u64)];

    /// Build a value from raw bits
    fn from_bits(bits: u64) -> Self;

    /// Raw bits of this value
    fn bits(&self) -> u64;
}

/// Parse `"Foo, Baz"` style text into the union of the named members
pub fn parse_flags<F: FieldFlags>(raw: &str) -> Result<F> {
    let mut bits = 0;
    for token in raw.split(',') {
        let name = token.trim();
        let member = F::MEMBERS
            .iter()
            .find(|(member, _)| member.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::InvalidValue {
                type_name: F::TYPE_NAME,
                value: raw.to_string(),
            })?;
        bits |= member.1;
    }
    Ok(F::from_bits(bits))
}

/// Textual form of a flag set: an exact member name if one matches,
/// otherwise the contributing members joined with `", "`
pub fn flags_text<F: FieldFlags>(value: &F) -> String {
    let bits = value.bits();
    if let Some((name, _)) = F::MEMBERS.iter().find(|(_, b)| *b == bits) {
        return name.to_string();
    }

    let mut remaining = bits;
    let mut names = Vec::new();
    for (name, member) in F::MEMBERS {
        if *member != 0 && bits & member == *member {
            names.push(*name);
            remaining &= !member;
        }
    }

    if names.is_empty() || remaining != 0 {
        bits.to_string()
    } else {
        names.join(", ")
    }
}
