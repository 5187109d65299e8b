pub mod solve;

use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use tsp_core::utils::GenericError;

pub(crate) fn create_write_buffer(out_file: Option<File>) -> BufWriter<Box<dyn Write>> {
    if let Some(out_file) = out_file {
        BufWriter::new(Box::new(out_file))
    } else {
        BufWriter::new(Box::new(stdout()))
    }
}

fn open_file(path: &str, description: &str) -> Result<File, GenericError> {
    File::open(path).map_err(|err| format!("cannot open {description} file '{path}': '{err}'").into())
}

fn create_file(path: &str, description: &str) -> Result<File, GenericError> {
    File::create(path).map_err(|err| format!("cannot create {description} file '{path}': '{err}'").into())
}
