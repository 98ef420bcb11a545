//! ARIB STD-B24で規定される8単位符号。

pub mod code;
pub mod control;
pub mod cursor;
pub(crate) mod decode;
pub mod output;
pub(crate) mod render;
pub mod select;
mod table;
