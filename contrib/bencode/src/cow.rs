use std::borrow::Cow;

/// Converts the key and byte arguments of the construction macros into a
/// `Cow`.
///
/// `&str` and `String` have no `From` into `Cow<_, [u8]>`. Borrowed input
/// stays borrowed and owned input stays owned.
pub trait BCowConvert<'a> {
    fn convert(self) -> Cow<'a, [u8]>;
}

impl<'a> BCowConvert<'a> for &'a [u8] {
    fn convert(self) -> Cow<'a, [u8]> {
        self.into()
    }
}

impl<'a> BCowConvert<'a> for &'a str {
    fn convert(self) -> Cow<'a, [u8]> {
        self.as_bytes().into()
    }
}

impl<'a> BCowConvert<'a> for &'a String {
    fn convert(self) -> Cow<'a, [u8]> {
        self.as_bytes().into()
    }
}

impl BCowConvert<'static> for String {
    fn convert(self) -> Cow<'static, [u8]> {
        self.into_bytes().into()
    }
}

impl BCowConvert<'static> for Vec<u8> {
    fn convert(self) -> Cow<'static, [u8]> {
        self.into()
    }
}
