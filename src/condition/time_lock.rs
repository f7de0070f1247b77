//! `TimeLockCondition`: an absolute height- or time-based gate wrapping another condition (§4.4.4).

use crate::condition::Condition;
use crate::context::{FulfillContext, SigHashInput};
use crate::encoding::{CodecError, ReadCodec, WriteCodec};
use crate::error::{FulfillError, StandardnessError};
use crate::fulfillment::Fulfillment;
use crate::unlock_hash::UnlockHash;

/// Below this value `lock_time` is a block height; at or above it, unix seconds (§3 invariant 4).
pub const LOCKTIME_HEIGHT_TIME_BOUNDARY: u64 = 500_000_000;

#[derive(Clone, Debug, PartialEq)]
pub struct TimeLockCondition {
    pub lock_time: u64,
    pub inner: Box<Condition>,
}

impl TimeLockCondition {
    pub fn new(lock_time: u64, inner: Condition) -> Self {
        TimeLockCondition { lock_time, inner: Box::new(inner) }
    }

    pub fn is_standard(&self) -> Result<(), StandardnessError> {
        if self.lock_time == 0 {
            return Err(StandardnessError::ZeroLockTime);
        }
        match self.inner.as_ref() {
            Condition::TimeLock(_) | Condition::AtomicSwap(_) => return Err(StandardnessError::NestedTimeLockOrAtomicSwap),
            Condition::Nil => {}
            Condition::UnlockHash(c) => c.is_standard()?,
            Condition::MultiSignature(c) => c.is_standard()?,
            Condition::Unknown(_) => return Err(StandardnessError::NonStandardInnerCondition),
        }
        Ok(())
    }

    pub fn unlock_hash(&self) -> UnlockHash { self.inner.unlock_hash() }

    /// Height semantics below the boundary, unix-time semantics at or above it (§4.4.4, §8).
    pub fn fulfillable(&self, block_height: u64, block_time: u64) -> bool {
        if self.lock_time < LOCKTIME_HEIGHT_TIME_BOUNDARY {
            self.lock_time <= block_height
        } else {
            self.lock_time <= block_time
        }
    }

    /// Binary payload: `lock_time(u64) || inner_tag(u8) || inner_payload` — the inner payload is
    /// not itself length-prefixed, it consumes the remainder of whatever buffer this was decoded
    /// from (§4.4.4).
    pub fn marshal<W: WriteCodec>(&self, w: &mut W) {
        w.write_u64(self.lock_time);
        w.write_u8(self.inner.tag());
        self.inner.marshal(w);
    }

    /// §4.4.4: requires the lock to have passed, then delegates — only `SingleSignature` or
    /// `MultiSignature` outer fulfillments are ever accepted here, regardless of what the inner
    /// condition itself would otherwise allow.
    pub fn fulfill<T: SigHashInput>(&self, fulfillment: &Fulfillment, ctx: &FulfillContext<T>) -> Result<(), FulfillError> {
        if !self.fulfillable(ctx.block_height, ctx.block_time) {
            return Err(FulfillError::TimeLockNotReached);
        }
        match fulfillment {
            Fulfillment::SingleSignature(_) | Fulfillment::MultiSignature(_) => self.inner.fulfill(fulfillment, ctx),
            _ => Err(FulfillError::UnexpectedFulfillment),
        }
    }

    pub fn unmarshal<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        let lock_time = r.read_u64()?;
        let inner_tag = r.read_u8()?;
        let inner_payload = r.read_raw(r.remaining())?;
        let inner = Condition::unmarshal_payload::<R>(inner_tag, inner_payload)?;
        Ok(TimeLockCondition { lock_time, inner: Box::new(inner) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::NilCondition;

    #[test]
    fn fulfillable_boundary_is_inclusive_per_regime() {
        let height_locked = TimeLockCondition::new(499_999_999, Condition::Nil);
        assert!(height_locked.fulfillable(499_999_999, 0));
        assert!(!height_locked.fulfillable(499_999_998, 0));

        let time_locked = TimeLockCondition::new(500_000_000, Condition::Nil);
        assert!(time_locked.fulfillable(0, 500_000_000));
        assert!(!time_locked.fulfillable(500_000_000, 499_999_999));
    }

    #[test]
    fn zero_lock_time_is_not_standard() {
        let c = TimeLockCondition::new(0, Condition::Nil);
        assert!(matches!(c.is_standard(), Err(StandardnessError::ZeroLockTime)));
    }

    #[test]
    fn nested_time_lock_is_rejected() {
        let nested = TimeLockCondition::new(10, Condition::TimeLock(Box::new(TimeLockCondition::new(5, Condition::Nil))));
        assert!(matches!(nested.is_standard(), Err(StandardnessError::NestedTimeLockOrAtomicSwap)));
    }

    #[test]
    fn nil_inner_marker_type_exists() {
        // NilCondition carries no fields; Condition::Nil is its unit-variant representation.
        let _ = NilCondition;
    }
}
