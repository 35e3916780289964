use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::mutable::encode;

/// The four bencode value kinds.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum Inner<'a> {
    /// Bencode Integer.
    Int(i64),
    /// Bencode Bytes.
    Bytes(Cow<'a, [u8]>),
    /// Bencode List.
    List(Vec<BencodeMut<'a>>),
    /// Bencode Dictionary. The map keeps its keys in byte order.
    Dict(BTreeMap<Cow<'a, [u8]>, BencodeMut<'a>>),
}

/// A bencode value ready to be encoded.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct BencodeMut<'a> {
    inner: Inner<'a>,
}

impl<'a> BencodeMut<'a> {
    fn new(inner: Inner<'a>) -> BencodeMut<'a> {
        BencodeMut { inner }
    }

    /// Create a new `BencodeMut` representing an `i64`.
    #[must_use]
    pub fn new_int(value: i64) -> BencodeMut<'a> {
        BencodeMut::new(Inner::Int(value))
    }

    /// Create a new `BencodeMut` representing a `[u8]`.
    #[must_use]
    pub fn new_bytes(value: Cow<'a, [u8]>) -> BencodeMut<'a> {
        BencodeMut::new(Inner::Bytes(value))
    }

    /// Create a new empty list.
    #[must_use]
    pub fn new_list() -> BencodeMut<'a> {
        BencodeMut::new(Inner::List(Vec::new()))
    }

    /// Create a new empty dictionary.
    #[must_use]
    pub fn new_dict() -> BencodeMut<'a> {
        BencodeMut::new(Inner::Dict(BTreeMap::new()))
    }

    #[must_use]
    pub fn from_list(list: Vec<BencodeMut<'a>>) -> BencodeMut<'a> {
        BencodeMut::new(Inner::List(list))
    }

    #[must_use]
    pub fn from_dict(dict: BTreeMap<Cow<'a, [u8]>, BencodeMut<'a>>) -> BencodeMut<'a> {
        BencodeMut::new(Inner::Dict(dict))
    }

    #[must_use]
    pub fn kind(&self) -> &Inner<'a> {
        &self.inner
    }

    /// Appends a value when `self` is a list. Returns `false` for any other kind.
    pub fn push(&mut self, value: BencodeMut<'a>) -> bool {
        match self.inner {
            Inner::List(ref mut list) => {
                list.push(value);
                true
            }
            _ => false,
        }
    }

    /// Inserts (or replaces) a key when `self` is a dictionary. Returns
    /// `false` for any other kind.
    pub fn insert(&mut self, key: Cow<'a, [u8]>, value: BencodeMut<'a>) -> bool {
        match self.inner {
            Inner::Dict(ref mut dict) => {
                dict.insert(key, value);
                true
            }
            _ => false,
        }
    }

    /// Encode the `BencodeMut` into a buffer representing the bencode.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::new();

        encode::encode(self, &mut buffer);

        buffer
    }
}

impl<'a> FromIterator<BencodeMut<'a>> for BencodeMut<'a> {
    /// Collects the values into a list.
    fn from_iter<T: IntoIterator<Item = BencodeMut<'a>>>(iter: T) -> Self {
        BencodeMut::from_list(iter.into_iter().collect())
    }
}
