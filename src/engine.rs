//! Authorization engine (C7, §4.7): the single entry point that pairs a condition with a
//! fulfillment. The dispatch table itself lives on `Condition::fulfill` — every variant already
//! knows which fulfillment shapes it accepts — so this module is the logging/observability
//! boundary wrapped around that match, not a second copy of it.

use crate::condition::Condition;
use crate::context::{FulfillContext, SigHashInput};
use crate::error::FulfillError;
use crate::fulfillment::Fulfillment;

/// Pairs `condition` with `fulfillment` under `ctx`, logging the outcome at the granularity a
/// node would want for rejected spends, without logging inside any per-byte codec loop (§3.1).
pub fn fulfill<T: SigHashInput>(condition: &Condition, fulfillment: &Fulfillment, ctx: &FulfillContext<T>) -> Result<(), FulfillError> {
    match condition.fulfill(fulfillment, ctx) {
        Ok(()) => Ok(()),
        Err(err) => {
            log::warn!(
                "rejected fulfillment: condition tag {}, fulfillment tag {}: {err}",
                condition.tag(),
                fulfillment.tag()
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TransactionVersion;
    use crate::fulfillment::SingleSignatureFulfillment;
    use crate::keys::PublicKey;

    struct NoPreimage;
    impl SigHashInput for NoPreimage {
        fn signature_preimage(&self) -> Vec<u8> { Vec::new() }
    }

    #[test]
    fn nil_condition_with_unexpected_fulfillment_is_rejected() {
        let tx = NoPreimage;
        let ctx = FulfillContext { transaction: &tx, transaction_version: TransactionVersion::Current, block_height: 0, block_time: 0 };
        let fulfillment = Fulfillment::MultiSignature(crate::fulfillment::MultiSignatureFulfillment::empty());
        let err = fulfill(&Condition::Nil, &fulfillment, &ctx).unwrap_err();
        assert!(matches!(err, FulfillError::UnexpectedFulfillment));
    }

    #[test]
    fn nil_condition_with_single_signature_delegates_to_verification() {
        let tx = NoPreimage;
        let ctx = FulfillContext { transaction: &tx, transaction_version: TransactionVersion::Current, block_height: 0, block_time: 0 };
        let pubkey = PublicKey::new_ed25519([1; 32]).unwrap();
        let fulfillment = Fulfillment::SingleSignature(SingleSignatureFulfillment::unsigned(pubkey));
        let err = fulfill(&Condition::Nil, &fulfillment, &ctx).unwrap_err();
        assert!(!matches!(err, FulfillError::UnexpectedFulfillment));
    }
}
