//! Fulfillment variants (C5, §4.5): data attached to an input that attempts to satisfy the
//! condition on the output it spends.

pub mod atomic_swap;
pub mod multi_signature;
pub mod single_signature;
pub mod unknown;

pub use atomic_swap::{AtomicSwapFulfillment, LegacyAtomicSwapFulfillment};
pub use multi_signature::{MultiSignatureFulfillment, MultiSignaturePair};
pub use single_signature::SingleSignatureFulfillment;
pub use unknown::UnknownFulfillment;

use crate::context::{SigHashInput, SignContext};
use crate::encoding::{CodecError, Decodable, Encodable, ReadCodec, WriteCodec};
use crate::error::{SignError, StandardnessError};
use atomic_swap::AtomicSwapVariant;

/// A fulfillment carries no type-level `NilFulfillment` struct (it has no fields); it is
/// represented directly by [`Fulfillment::Nil`], matching [`crate::condition::NilCondition`]'s
/// treatment (§3).
#[derive(Clone, Debug, PartialEq)]
pub enum Fulfillment {
    Nil,
    SingleSignature(SingleSignatureFulfillment),
    AtomicSwap(AtomicSwapFulfillment),
    LegacyAtomicSwap(LegacyAtomicSwapFulfillment),
    MultiSignature(MultiSignatureFulfillment),
    Unknown(UnknownFulfillment),
}

impl Fulfillment {
    pub fn tag(&self) -> u8 {
        match self {
            Fulfillment::Nil => 0,
            Fulfillment::SingleSignature(_) => 1,
            Fulfillment::AtomicSwap(_) | Fulfillment::LegacyAtomicSwap(_) => 2,
            Fulfillment::MultiSignature(_) => 3,
            Fulfillment::Unknown(u) => u.tag,
        }
    }

    pub fn marshal<W: WriteCodec>(&self, w: &mut W) {
        match self {
            Fulfillment::Nil => {}
            Fulfillment::SingleSignature(f) => f.encode(w),
            Fulfillment::AtomicSwap(f) => f.encode(w),
            Fulfillment::LegacyAtomicSwap(f) => f.encode(w),
            Fulfillment::MultiSignature(f) => f.encode(w),
            Fulfillment::Unknown(u) => w.write_raw(&u.payload),
        }
    }

    /// Decodes a single proxy payload already scoped to its declared length. Tag 2 uses the
    /// try-current-then-legacy dispatch of §4.5.1; every other tag has an unambiguous layout.
    pub fn unmarshal_payload<'a, R: ReadCodec<'a>>(tag: u8, payload: &'a [u8]) -> Result<Self, CodecError> {
        match tag {
            0 => Ok(Fulfillment::Nil),
            1 => {
                let mut r = R::from_bytes(payload);
                let f = SingleSignatureFulfillment::decode(&mut r)?;
                r.finish()?;
                Ok(Fulfillment::SingleSignature(f))
            }
            2 => match atomic_swap::unmarshal_binary::<R>(payload)? {
                AtomicSwapVariant::Current(f) => Ok(Fulfillment::AtomicSwap(f)),
                AtomicSwapVariant::Legacy(f) => Ok(Fulfillment::LegacyAtomicSwap(f)),
            },
            3 => {
                let mut r = R::from_bytes(payload);
                let f = MultiSignatureFulfillment::decode(&mut r)?;
                r.finish()?;
                Ok(Fulfillment::MultiSignature(f))
            }
            other => {
                log::debug!("decoded unknown fulfillment tag {other}, preserving {} raw payload byte(s)", payload.len());
                Ok(Fulfillment::Unknown(UnknownFulfillment { tag: other, payload: payload.to_vec() }))
            }
        }
    }

    pub fn is_standard(&self) -> Result<(), StandardnessError> {
        match self {
            Fulfillment::Nil => Err(StandardnessError::Nil),
            Fulfillment::SingleSignature(f) => f.is_standard(),
            Fulfillment::AtomicSwap(f) => f.is_standard(),
            Fulfillment::LegacyAtomicSwap(f) => f.is_standard(),
            Fulfillment::MultiSignature(f) => f.is_standard(),
            Fulfillment::Unknown(_) => Err(StandardnessError::Unknown),
        }
    }

    pub fn equal(&self, other: &Fulfillment) -> bool {
        match (self, other) {
            (Fulfillment::Nil, Fulfillment::Nil) => true,
            (Fulfillment::SingleSignature(a), Fulfillment::SingleSignature(b)) => a.equal(b),
            (Fulfillment::AtomicSwap(a), Fulfillment::AtomicSwap(b)) => a == b,
            (Fulfillment::LegacyAtomicSwap(a), Fulfillment::LegacyAtomicSwap(b)) => a == b,
            (Fulfillment::MultiSignature(a), Fulfillment::MultiSignature(b)) => a.equal(b),
            (Fulfillment::Unknown(a), Fulfillment::Unknown(b)) => a == b,
            _ => false,
        }
    }

    pub fn sign<T: SigHashInput>(&mut self, ctx: &SignContext<T>) -> Result<(), SignError> {
        match self {
            Fulfillment::Nil => Err(SignError::NilFulfillment),
            Fulfillment::SingleSignature(f) => f.sign(ctx),
            Fulfillment::AtomicSwap(f) => f.sign(ctx),
            Fulfillment::LegacyAtomicSwap(f) => f.sign(ctx),
            Fulfillment::MultiSignature(f) => f.sign(ctx),
            Fulfillment::Unknown(_) => Err(SignError::UnknownFulfillment),
        }
    }
}
