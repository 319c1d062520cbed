//! `CondensedDecoder` — Condensed binary reader.

use std::rc::Rc;

use json_condensed_buffers::{decode_f15, Reader};

use crate::value::{upsert, Number, ObjectEntries, Precision, Value};

use super::constants::*;
use super::error::CondensedError;

/// Shapes keyed by the order their indices first appear in the payload.
type ShapeRegistry = Vec<Option<Rc<Vec<String>>>>;

/// Condensed binary reader.
///
/// Self-contained: the shape registry is rebuilt per payload from the key
/// lists traveling with each first shape reference. Numbers decoded from
/// sized float tags carry the matching [`Precision`] hint so re-encoding
/// reproduces the input bytes.
pub struct CondensedDecoder;

impl Default for CondensedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CondensedDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes one root value; trailing bytes are ignored.
    pub fn decode(&mut self, data: &[u8]) -> Result<Value, CondensedError> {
        let mut reader = Reader::new(data);
        let mut shapes: ShapeRegistry = Vec::new();
        read_any(&mut reader, &mut shapes)
    }
}

fn need(reader: &Reader, size: usize) -> Result<(), CondensedError> {
    if reader.size() < size {
        Err(CondensedError::UnexpectedEof)
    } else {
        Ok(())
    }
}

fn read_any(reader: &mut Reader, shapes: &mut ShapeRegistry) -> Result<Value, CondensedError> {
    need(reader, 1)?;
    let offset = reader.x;
    let tag = reader.u8();

    if tag & HALF_PRECISION_FLOAT != 0 {
        need(reader, 1)?;
        let mantissa = reader.u8();
        let value = decode_f15(tag, mantissa);
        return Ok(Value::Number(Number::with_hint(value, Precision::Half)));
    }

    match tag {
        RESERVED_1 | RESERVED_2 => Err(CondensedError::VersionTooLow(tag)),
        RESERVED_4 => Err(CondensedError::ReservedTag(tag)),
        TERMINATOR => Err(CondensedError::UnexpectedTerminator(offset)),
        LONG_STRING => {
            let s = read_nul_string(reader)?;
            Ok(Value::String(s))
        }
        UNCOMMON_OBJECT => {
            need(reader, 1)?;
            let index = reader.u8() as usize + UNCOMMON_INDEX_BASE;
            read_object_by_index(reader, shapes, index)
        }
        RARE_OBJECT => {
            need(reader, 2)?;
            let index = reader.u16() as usize + RARE_INDEX_BASE;
            read_object_by_index(reader, shapes, index)
        }
        LARGE_UNIQUE_OBJECT => {
            let names = read_shape_names(reader)?;
            read_object_fields(reader, shapes, &names)
        }
        HASHTABLE => read_hashtable(reader, shapes),
        LONG_ARRAY => {
            let mut elements = Vec::new();
            loop {
                need(reader, 1)?;
                if reader.peek() == TERMINATOR {
                    reader.skip(1);
                    return Ok(Value::Array(elements));
                }
                elements.push(read_any(reader, shapes)?);
            }
        }
        DOUBLE => {
            need(reader, 8)?;
            let value = reader.f64_le();
            Ok(Value::Number(Number::with_hint(value, Precision::Double)))
        }
        FLOAT => {
            need(reader, 4)?;
            let value = reader.f32_le() as f64;
            Ok(Value::Number(Number::with_hint(value, Precision::Single)))
        }
        SIGNED_LONG_INTEGER => {
            need(reader, 8)?;
            Ok(Value::Number(Number::new(reader.i64_le() as f64)))
        }
        UNSIGNED_LONG_INTEGER => {
            need(reader, 8)?;
            Ok(Value::Number(Number::new(reader.u64_le() as f64)))
        }
        SIGNED_INTEGER => {
            need(reader, 4)?;
            Ok(Value::Number(Number::new(reader.i32_le() as f64)))
        }
        UNSIGNED_INTEGER => {
            need(reader, 4)?;
            Ok(Value::Number(Number::new(reader.u32_le() as f64)))
        }
        SIGNED_SHORT_INTEGER => {
            need(reader, 2)?;
            Ok(Value::Number(Number::new(reader.i16_le() as f64)))
        }
        UNSIGNED_SHORT_INTEGER => {
            need(reader, 2)?;
            Ok(Value::Number(Number::new(reader.u16_le() as f64)))
        }
        TRUE => Ok(Value::Bool(true)),
        FALSE => Ok(Value::Bool(false)),
        NIL => Ok(Value::Null),
        _ => read_patterned(reader, shapes, tag, offset),
    }
}

/// Tags whose low bits carry a payload: short strings, minimal and very
/// short integers, common objects, small unique objects and short arrays.
fn read_patterned(
    reader: &mut Reader,
    shapes: &mut ShapeRegistry,
    tag: u8,
    offset: usize,
) -> Result<Value, CondensedError> {
    if tag & 0b1110_0000 == SHORT_STRING {
        let length = (tag & 0x1f) as usize;
        need(reader, length)?;
        let bytes = reader.buf(length).to_vec();
        let s = String::from_utf8(bytes).map_err(|_| CondensedError::InvalidUtf8(offset))?;
        return Ok(Value::String(s));
    }
    if tag & 0b1110_0000 == MINIMAL_INTEGER {
        let mut value = (tag & 0x0f) as i64;
        if tag & 0x10 != 0 {
            value |= !0x0f;
        }
        return Ok(Value::Number(Number::new(value as f64)));
    }
    if tag & 0b1111_1000 == COMMON_OBJECT {
        // 0x3D..0x3F were matched earlier, so the index is 0..=4 here.
        let index = (tag & 0x07) as usize;
        return read_object_by_index(reader, shapes, index);
    }
    if tag & 0b1111_1000 == SMALL_UNIQUE_OBJECT {
        let count = (tag & 0x07) as usize;
        let mut names = Vec::with_capacity(count);
        for _ in 0..count {
            names.push(read_code_string(reader)?);
        }
        return read_object_fields(reader, shapes, &names);
    }
    if tag & 0b1111_0000 == SHORT_ARRAY {
        let length = (tag & 0x0f) as usize;
        let mut elements = Vec::with_capacity(length);
        for _ in 0..length {
            elements.push(read_any(reader, shapes)?);
        }
        return Ok(Value::Array(elements));
    }
    if tag & 0b1111_0000 == VERY_SHORT_INTEGER {
        let mut value = ((tag & 0x07) as i64) << 8;
        if tag & 0x08 != 0 {
            value |= !0x7ff;
        }
        need(reader, 1)?;
        value |= reader.u8() as i64;
        return Ok(Value::Number(Number::new(value as f64)));
    }
    Err(CondensedError::UnknownTag(tag, offset))
}

/// Reads one key of a shape key list: bytes below `0x80` accumulate, the
/// final byte carries [`KEY_FINAL_BIT`]; a lone marker is an empty key.
fn read_code_string(reader: &mut Reader) -> Result<String, CondensedError> {
    need(reader, 1)?;
    let offset = reader.x;
    let mut byte = reader.u8();
    if byte == KEY_FINAL_BIT {
        return Ok(String::new());
    }
    let mut bytes = Vec::new();
    loop {
        if byte >= KEY_FINAL_BIT {
            bytes.push(byte & 0x7f);
            break;
        }
        bytes.push(byte);
        need(reader, 1)?;
        byte = reader.u8();
    }
    String::from_utf8(bytes).map_err(|_| CondensedError::InvalidUtf8(offset))
}

/// Reads a shape key list terminated by `0x00`.
fn read_shape_names(reader: &mut Reader) -> Result<Vec<String>, CondensedError> {
    let mut names = Vec::new();
    loop {
        need(reader, 1)?;
        if reader.peek() == TERMINATOR {
            reader.skip(1);
            return Ok(names);
        }
        names.push(read_code_string(reader)?);
    }
}

fn read_nul_string(reader: &mut Reader) -> Result<String, CondensedError> {
    let offset = reader.x;
    let mut bytes = Vec::new();
    loop {
        need(reader, 1)?;
        let byte = reader.u8();
        if byte == TERMINATOR {
            break;
        }
        bytes.push(byte);
    }
    String::from_utf8(bytes).map_err(|_| CondensedError::InvalidUtf8(offset))
}

fn read_object_by_index(
    reader: &mut Reader,
    shapes: &mut ShapeRegistry,
    index: usize,
) -> Result<Value, CondensedError> {
    if shapes.len() <= index {
        shapes.resize(index + 1, None);
    }
    if shapes[index].is_none() {
        let list = read_shape_names(reader)?;
        if list.is_empty() {
            return Err(CondensedError::InvalidShapeRef(index));
        }
        shapes[index] = Some(Rc::new(list));
    }
    let names = match &shapes[index] {
        Some(names) => Rc::clone(names),
        None => return Err(CondensedError::InvalidShapeRef(index)),
    };
    read_object_fields(reader, shapes, &names)
}

fn read_object_fields(
    reader: &mut Reader,
    shapes: &mut ShapeRegistry,
    names: &[String],
) -> Result<Value, CondensedError> {
    let mut entries: ObjectEntries = Vec::with_capacity(names.len());
    for name in names {
        let value = read_any(reader, shapes)?;
        upsert(&mut entries, name.clone(), value);
    }
    Ok(Value::Object(entries))
}

fn read_hashtable(reader: &mut Reader, shapes: &mut ShapeRegistry) -> Result<Value, CondensedError> {
    let mut names = Vec::new();
    loop {
        need(reader, 1)?;
        if reader.peek() == TERMINATOR {
            reader.skip(1);
            break;
        }
        names.push(read_nul_string(reader)?);
    }
    // A second terminator right after the key list marks an empty-name
    // field whose value travels last.
    if reader.size() > 0 && reader.peek() == TERMINATOR {
        reader.skip(1);
        names.push(String::new());
    }
    read_object_fields(reader, shapes, &names)
}
