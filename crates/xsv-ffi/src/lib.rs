//! C FFI bindings for xsv-core
//!
//! This crate exposes the untyped parse/compose surface to C or C++ hosts.
//! Typed record binding stays on the Rust side.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use xsv_core::{Dialect, Table};

/// Dialect selector for C callers: 0 = comma, 1 = tab
pub const XSV_DIALECT_COMMA: u32 = 0;
pub const XSV_DIALECT_TAB: u32 = 1;

/// Opaque handle to a parsed table
pub struct XsvTable {
    dialect: Dialect,
    rows: Table,
}

fn dialect_from_code(code: u32) -> Option<Dialect> {
    match code {
        XSV_DIALECT_COMMA => Some(Dialect::Comma),
        XSV_DIALECT_TAB => Some(Dialect::Tab),
        _ => None,
    }
}

/// Parse delimited text into a table
///
/// # Safety
/// - `text` must be a valid, NUL-terminated UTF-8 C string
/// - Returns null on invalid input or unknown dialect
#[no_mangle]
pub unsafe extern "C" fn xsv_parse(text: *const c_char, dialect: u32) -> *mut XsvTable {
    if text.is_null() {
        return ptr::null_mut();
    }

    let dialect = match dialect_from_code(dialect) {
        Some(d) => d,
        None => return ptr::null_mut(),
    };

    let text = match CStr::from_ptr(text).to_str() {
        Ok(s) => s,
        Err(_) => return ptr::null_mut(),
    };

    let rows = xsv_core::parse(dialect, text);
    Box::into_raw(Box::new(XsvTable { dialect, rows }))
}

/// Free a table
///
/// # Safety
/// - `table` must be a valid pointer returned by `xsv_parse` or null
#[no_mangle]
pub unsafe extern "C" fn xsv_free_table(table: *mut XsvTable) {
    if !table.is_null() {
        drop(Box::from_raw(table));
    }
}

/// Get the number of rows in a table
///
/// # Safety
/// - `table` must be a valid pointer returned by `xsv_parse`
#[no_mangle]
pub unsafe extern "C" fn xsv_table_row_count(table: *const XsvTable) -> usize {
    if table.is_null() {
        return 0;
    }
    (*table).rows.len()
}

/// Get the number of fields in one row (0 if the row does not exist)
///
/// # Safety
/// - `table` must be a valid pointer returned by `xsv_parse`
#[no_mangle]
pub unsafe extern "C" fn xsv_table_field_count(table: *const XsvTable, row: usize) -> usize {
    if table.is_null() {
        return 0;
    }
    (&(*table).rows).get(row).map(|r| r.len()).unwrap_or(0)
}

/// Get a field value
///
/// # Safety
/// - `table` must be a valid pointer returned by `xsv_parse`
/// - Returns null if the position is out of bounds or the field contains NUL
/// - Caller must free the returned string with `xsv_free_string`
#[no_mangle]
pub unsafe extern "C" fn xsv_table_field(
    table: *const XsvTable,
    row: usize,
    field: usize,
) -> *mut c_char {
    if table.is_null() {
        return ptr::null_mut();
    }

    (&(*table).rows)
        .get(row)
        .and_then(|r| r.get(field))
        .and_then(|f| CString::new(f.as_str()).ok())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Compose a table back into text using the dialect it was parsed with
///
/// # Safety
/// - `table` must be a valid pointer returned by `xsv_parse`
/// - Caller must free the returned string with `xsv_free_string`
#[no_mangle]
pub unsafe extern "C" fn xsv_table_compose(table: *const XsvTable) -> *mut c_char {
    if table.is_null() {
        return ptr::null_mut();
    }

    let table = &*table;
    CString::new(xsv_core::compose(table.dialect, &table.rows))
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Free a string returned by this library
///
/// # Safety
/// - `s` must be a valid pointer returned by this library or null
#[no_mangle]
pub unsafe extern "C" fn xsv_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take_string(s: *mut c_char) -> String {
        assert!(!s.is_null());
        unsafe {
            let value = CStr::from_ptr(s).to_str().unwrap().to_string();
            xsv_free_string(s);
            value
        }
    }

    #[test]
    fn test_parse_and_read_fields() {
        let text = CString::new("id,name\n10,\"Bob, Jr.\"").unwrap();

        unsafe {
            let table = xsv_parse(text.as_ptr(), XSV_DIALECT_COMMA);
            assert!(!table.is_null());

            assert_eq!(xsv_table_row_count(table), 2);
            assert_eq!(xsv_table_field_count(table, 1), 2);
            assert_eq!(xsv_table_field_count(table, 5), 0);
            assert_eq!(take_string(xsv_table_field(table, 1, 1)), "Bob, Jr.");
            assert!(xsv_table_field(table, 1, 2).is_null());

            assert_eq!(
                take_string(xsv_table_compose(table)),
                "id,name\n10,\"Bob, Jr.\""
            );

            xsv_free_table(table);
        }
    }

    #[test]
    fn test_invalid_input() {
        let text = CString::new("a\tb").unwrap();

        unsafe {
            assert!(xsv_parse(ptr::null(), XSV_DIALECT_TAB).is_null());
            assert!(xsv_parse(text.as_ptr(), 7).is_null());
            assert_eq!(xsv_table_row_count(ptr::null()), 0);
            xsv_free_table(ptr::null_mut());
        }
    }
}
