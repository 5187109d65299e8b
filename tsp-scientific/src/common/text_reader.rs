#[cfg(test)]
#[path = "../../tests/unit/common/text_reader_test.rs"]
mod text_reader_test;

use std::io::prelude::*;
use std::io::{BufReader, Read};
use tsp_core::utils::{Float, GenericError, GenericResult};

/// Reads a single line into the buffer, returns amount of bytes read: zero means end of input.
pub(crate) fn read_line<R: Read>(reader: &mut BufReader<R>, buffer: &mut String) -> GenericResult<usize> {
    buffer.clear();
    reader.read_line(buffer).map_err(|err| err.to_string().into())
}

/// Splits a `KEY : VALUE` line into trimmed key and value.
pub(crate) fn split_key_value(line: &str) -> Option<(&str, &str)> {
    line.split_once(':').map(|(key, value)| (key.trim(), value.trim()))
}

pub(crate) fn parse_float(data: &str, err_msg: &str) -> GenericResult<Float> {
    data.parse::<Float>().map_err(|err| format!("{err_msg}: '{err}'").into())
}

pub(crate) fn parse_int(data: &str, err_msg: &str) -> GenericResult<usize> {
    data.parse::<Float>()
        // NOTE some files have integral values written like 48.00000
        .map_err(|err| GenericError::from(format!("{err_msg}: '{err}'")))
        .and_then(|value| {
            if value >= 0. && value.fract() == 0. {
                Ok(value as usize)
            } else {
                Err(format!("{err_msg}: '{value}' is not a non-negative integer").into())
            }
        })
}
