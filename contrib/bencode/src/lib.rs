//! Encoding of bencoded data.
//!
//! Only the encoder is provided: the tracker writes bencode but never reads
//! it. Values are built with [`BencodeMut`] or, more conveniently, with the
//! construction macros. Dictionary keys are always written in byte order,
//! whatever order they were inserted in.
//!
//! ```rust
//!     #[macro_use]
//!     extern crate bencode;
//!
//!     fn main() {
//!         let message = (ben_map!{
//!             "interval" => ben_int!(1800),
//!             "peers" => ben_list!()
//!         }).encode();
//!
//!         let data = b"d8:intervali1800e5:peerslee"; // cspell:disable-line
//!         assert_eq!(&data[..], &message[..]);
//!     }
//! ```

mod cow;
mod mutable;

/// Traits for implementation functionality.
pub mod inner {
    pub use crate::cow::BCowConvert;
}

pub use crate::mutable::bencode_mut::{BencodeMut, Inner};

const BEN_END: u8 = b'e';
const DICT_START: u8 = b'd';
const LIST_START: u8 = b'l';
const INT_START: u8 = b'i';

const BYTE_LEN_END: u8 = b':';

/// Construct a `BencodeMut` map by supplying string references as keys and `BencodeMut` as values.
#[macro_export]
macro_rules! ben_map {
( $($key:expr => $val:expr),* ) => {
        {
            use $crate::BencodeMut;
            use $crate::inner::BCowConvert;

            #[allow(unused_mut)]
            let mut map = ::std::collections::BTreeMap::new();
            $(
                map.insert(BCowConvert::convert($key), $val);
            )*

            BencodeMut::from_dict(map)
        }
    }
}

/// Construct a `BencodeMut` list by supplying a list of `BencodeMut` values.
#[macro_export]
macro_rules! ben_list {
    ( $($ben:expr),* ) => {
        {
            use $crate::BencodeMut;

            BencodeMut::from_list(::std::vec![$($ben),*])
        }
    }
}

/// Construct `BencodeMut` bytes by supplying a type convertible to `Vec<u8>`.
#[macro_export]
macro_rules! ben_bytes {
    ( $ben:expr ) => {{
        use $crate::inner::BCowConvert;
        use $crate::BencodeMut;

        BencodeMut::new_bytes(BCowConvert::convert($ben))
    }};
}

/// Construct a `BencodeMut` integer by supplying an `i64`.
#[macro_export]
macro_rules! ben_int {
    ( $ben:expr ) => {{
        use $crate::BencodeMut;

        BencodeMut::new_int($ben)
    }};
}
