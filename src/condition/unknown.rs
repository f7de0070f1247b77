//! `UnknownCondition`: forward-compatible holder for a tag this build does not recognize (§4.4.6).

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownCondition {
    pub tag: u8,
    pub payload: Vec<u8>,
}
