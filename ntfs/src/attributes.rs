//! Walks the typed, length-prefixed attribute stream embedded in a
//! (fixed-up) file record segment, starting at its `first_attribute_offset`
//! and stopping at the `0xFFFFFFFF` end marker.

use byteorder::{ByteOrder, LittleEndian};
use ntfsidx_core::NtfsError;

use crate::structures::attribute_header::*;
use crate::structures::nonresident_attribute;
use crate::structures::resident_attribute;

/// A single parsed attribute header plus its value slice, borrowed from the
/// record buffer it was walked out of.
#[derive(Debug)]
pub struct Attribute<'a> {
    pub attribute_type: u32,
    pub non_resident: bool,
    pub low_vcn: u64,
    pub high_vcn: u64,
    /// Logical byte size of the stream; only meaningful when non-resident.
    pub data_size: u64,
    /// Resident value bytes, or the run-list byte stream when non-resident.
    pub value: &'a [u8],
}

/// Iterates the attributes of one record, in on-disk order.
pub struct AttributeWalker<'a> {
    record: &'a [u8],
    pos: usize,
}

impl<'a> AttributeWalker<'a> {
    pub fn new(record: &'a [u8], first_attribute_offset: usize) -> Self {
        Self { record, pos: first_attribute_offset }
    }

    /// Convenience: returns the first attribute of `attribute_type`, if any.
    pub fn find(record: &'a [u8], first_attribute_offset: usize, attribute_type: u32) -> Result<Option<Attribute<'a>>, NtfsError> {
        for attr in Self::new(record, first_attribute_offset) {
            let attr = attr?;
            if attr.attribute_type == attribute_type {
                return Ok(Some(attr));
            }
        }
        Ok(None)
    }
}

impl<'a> Iterator for AttributeWalker<'a> {
    type Item = Result<Attribute<'a>, NtfsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos + 4 > self.record.len() {
            return None;
        }

        let attribute_type = LittleEndian::read_u32(&self.record[self.pos..]);
        if attribute_type == TYPE_END_MARKER {
            return None;
        }
        if !(TYPE_MIN..=TYPE_MAX).contains(&attribute_type) {
            return Some(Err(NtfsError::CorruptRecord(format!(
                "attribute type {:#x} outside valid range",
                attribute_type
            ))));
        }

        if self.pos + HEADER_LEN > self.record.len() {
            return Some(Err(NtfsError::CorruptRecord("attribute header truncated".to_string())));
        }

        let length = LittleEndian::read_u32(&self.record[self.pos + LENGTH_OFFSET..]) as usize;
        if length == 0 || self.pos + length > self.record.len() {
            return Some(Err(NtfsError::CorruptRecord(format!(
                "attribute length {} overruns record",
                length
            ))));
        }

        let non_resident = self.record[self.pos + NON_RESIDENT_OFFSET] != 0;

        if non_resident && self.pos + nonresident_attribute::DATA_SIZE_OFFSET + 8 > self.pos + length {
            return Some(Err(NtfsError::CorruptRecord(
                "non-resident attribute header shorter than expected".to_string(),
            )));
        }

        let attr = if non_resident {
            let low_vcn = LittleEndian::read_u64(&self.record[self.pos + nonresident_attribute::LOW_VCN_OFFSET..]);
            let high_vcn = LittleEndian::read_u64(&self.record[self.pos + nonresident_attribute::HIGH_VCN_OFFSET..]);
            let run_array_offset = LittleEndian::read_u16(
                &self.record[self.pos + nonresident_attribute::RUN_ARRAY_OFFSET_OFFSET..],
            ) as usize;

            if self.pos + run_array_offset > self.pos + length {
                return Some(Err(NtfsError::CorruptRecord("run array offset outside attribute".to_string())));
            }

            let data_size =
                LittleEndian::read_u64(&self.record[self.pos + nonresident_attribute::DATA_SIZE_OFFSET..]);

            Attribute {
                attribute_type,
                non_resident: true,
                low_vcn,
                high_vcn,
                data_size,
                value: &self.record[self.pos + run_array_offset..self.pos + length],
            }
        } else {
            let value_length =
                LittleEndian::read_u32(&self.record[self.pos + resident_attribute::VALUE_LENGTH_OFFSET..]) as usize;
            let value_offset =
                LittleEndian::read_u16(&self.record[self.pos + resident_attribute::VALUE_OFFSET_OFFSET..]) as usize;

            if self.pos + value_offset + value_length > self.pos + length {
                return Some(Err(NtfsError::CorruptRecord("resident value overruns attribute".to_string())));
            }

            Attribute {
                attribute_type,
                non_resident: false,
                low_vcn: 0,
                high_vcn: 0,
                data_size: 0,
                value: &self.record[self.pos + value_offset..self.pos + value_offset + value_length],
            }
        };

        self.pos += length;
        Some(Ok(attr))
    }
}
