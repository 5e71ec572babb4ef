//! Dotted identifier delimiting.
//!
//! A name such as `schema.table.column` is split on `.` and every segment is
//! delimited by the [`Driver`] on its own, so the separators stay unquoted:
//!
//! ```ignore
//! use sqlprep::{MySqlDriver, ident};
//!
//! assert_eq!(ident::delimit(&MySqlDriver, "db.users"), "`db`.`users`");
//! ```

use crate::driver::Driver;

/// Delimit every `.`-separated segment of `name`.
pub fn delimit(driver: &dyn Driver, name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    write_delimited(driver, name, &mut out);
    out
}

pub(crate) fn write_delimited(driver: &dyn Driver, name: &str, out: &mut String) {
    for (i, segment) in name.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&driver.delimit(segment));
    }
}
