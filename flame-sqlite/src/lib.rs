mod cbox;
mod connection;
mod driver;
mod extract;
mod grammar;
mod prepared;

use std::{
    ffi::{CStr, c_char},
    ptr,
};

pub(crate) use cbox::*;
pub use connection::*;
pub use driver::*;
pub use grammar::*;
pub use prepared::*;

pub(crate) fn error_message_from_ptr<'a>(ptr: &'a *const c_char) -> &'a str {
    unsafe {
        if *ptr != ptr::null() {
            CStr::from_ptr(*ptr)
                .to_str()
                .unwrap_or("Unknown error (the error message was not a valid C string)")
        } else {
            "Unknown error (could not extract the error message)"
        }
    }
}
