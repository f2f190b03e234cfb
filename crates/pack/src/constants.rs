//! Wire tags and type codes.

use celltable_core::DataType;

use crate::error::PackError;

pub(crate) const TAG_MISSING: u8 = 0x00;
pub(crate) const TAG_INT: u8 = 0x01;
pub(crate) const TAG_DOUBLE: u8 = 0x02;
pub(crate) const TAG_STR: u8 = 0x03;
pub(crate) const TAG_BLOB: u8 = 0x04;
pub(crate) const TAG_WRAPPER_ADDR: u8 = 0x05;
pub(crate) const TAG_WRAPPER_INLINE: u8 = 0x06;

/// One-byte wire code for a type tag.
pub fn type_code(data_type: DataType) -> u8 {
    match data_type {
        DataType::Missing => 0x00,
        DataType::Int => 0x01,
        DataType::Double => 0x02,
        DataType::Number => 0x03,
        DataType::Str => 0x04,
        DataType::Image => 0x05,
        DataType::Document => 0x06,
        DataType::Binary => 0x07,
        DataType::Value => 0x08,
    }
}

/// Inverse of [`type_code`].
pub fn type_from_code(code: u8) -> Result<DataType, PackError> {
    Ok(match code {
        0x00 => DataType::Missing,
        0x01 => DataType::Int,
        0x02 => DataType::Double,
        0x03 => DataType::Number,
        0x04 => DataType::Str,
        0x05 => DataType::Image,
        0x06 => DataType::Document,
        0x07 => DataType::Binary,
        0x08 => DataType::Value,
        other => return Err(PackError::InvalidTypeCode(other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_codes_roundtrip() {
        for code in 0x00..=0x08u8 {
            let t = type_from_code(code).unwrap();
            assert_eq!(type_code(t), code);
        }
        assert_eq!(
            type_from_code(0x09),
            Err(PackError::InvalidTypeCode(0x09))
        );
    }
}
