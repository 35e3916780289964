use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::mutable::bencode_mut::{BencodeMut, Inner};

pub fn encode(val: &BencodeMut<'_>, bytes: &mut Vec<u8>) {
    match val.kind() {
        Inner::Int(n) => encode_int(*n, bytes),
        Inner::Bytes(n) => encode_bytes(n, bytes),
        Inner::List(n) => encode_list(n, bytes),
        Inner::Dict(n) => encode_dict(n, bytes),
    }
}

fn encode_int(val: i64, bytes: &mut Vec<u8>) {
    bytes.push(crate::INT_START);

    bytes.extend(val.to_string().into_bytes());

    bytes.push(crate::BEN_END);
}

fn encode_bytes(list: &[u8], bytes: &mut Vec<u8>) {
    bytes.extend(list.len().to_string().into_bytes());

    bytes.push(crate::BYTE_LEN_END);

    bytes.extend_from_slice(list);
}

fn encode_list(list: &[BencodeMut<'_>], bytes: &mut Vec<u8>) {
    bytes.push(crate::LIST_START);

    for i in list {
        encode(i, bytes);
    }

    bytes.push(crate::BEN_END);
}

fn encode_dict(dict: &BTreeMap<Cow<'_, [u8]>, BencodeMut<'_>>, bytes: &mut Vec<u8>) {
    // The map iterates its keys in byte order already
    bytes.push(crate::DICT_START);
    for (key, value) in dict {
        encode_bytes(key, bytes);
        encode(value, bytes);
    }
    bytes.push(crate::BEN_END);
}
