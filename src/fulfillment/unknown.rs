//! `UnknownFulfillment`: forward-compatible holder for a tag this build does not recognize (§4.5).

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownFulfillment {
    pub tag: u8,
    pub payload: Vec<u8>,
}
