//! ARIB STD-B24およびABNT NBR 15606-1で規定される8単位符号の文字列をUTF-8に変換するクレート。
//!
//! ```
//! use isdb_text::{Profile, Session};
//!
//! let mut session = Session::open(Profile::Arib).unwrap();
//! let mut buf = [0; 64];
//! let decoded = session.decode(b"\x34\x41\x3B\x7A\x0E\x41\x42\x43", &mut buf);
//! assert_eq!(&buf[..decoded.written], "漢字ABC".as_bytes());
//! session.close();
//! ```

#![deny(missing_docs)]

pub mod convert;
pub mod eight;
pub mod session;

pub use convert::{ConvertError, Iso2022Jp3Converter, KanjiConverter, OpenError};
pub use eight::code::{Designator, GraphicSet, Options, Profile};
pub use session::{Decoded, Session, Status};
