pub mod bencode_mut;
mod encode;
