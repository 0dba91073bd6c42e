use crate::{Error, Result};
use std::ffi::CString;

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Convert the text of a query into a C string, failing on interior nul bytes.
pub fn as_c_string<S: Into<Vec<u8>>>(str: S) -> Result<CString> {
    CString::new(str.into())
        .map_err(|e| Error::new(e).context("Could not create a C string from the query"))
}

#[macro_export]
macro_rules! possibly_parenthesized {
    ($buff:ident, $cond:expr, $v:expr) => {
        if $cond {
            $buff.push('(');
            $v;
            $buff.push(')');
        } else {
            $v;
        }
    };
}

/// Query text shortened for error messages and logs.
#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        match ::std::convert::AsRef::<str>::as_ref(&$query) {
            query => {
                let mut end = ::std::cmp::min(query.len(), 497);
                while !query.is_char_boundary(end) {
                    end -= 1;
                }
                format!(
                    "{}{}",
                    query[..end].trim_end(),
                    if query.len() > end { "..." } else { "" }
                )
            }
        }
    };
}
