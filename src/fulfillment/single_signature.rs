//! `SingleSignatureFulfillment`: one signature over one public key (§4.5).

use crate::context::{SigHashInput, SignContext};
use crate::encoding::{CodecError, Decodable, Encodable, ReadCodec, WriteCodec};
use crate::error::{SignError, StandardnessError};
use crate::hash::Signature;
use crate::keys::PublicKey;
use crate::sighash::digest_for_version;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SingleSignatureFulfillment {
    pub pubkey: PublicKey,
    pub signature: Signature,
}

impl SingleSignatureFulfillment {
    pub fn unsigned(pubkey: PublicKey) -> Self {
        SingleSignatureFulfillment { pubkey, signature: Signature::default() }
    }

    pub fn is_standard(&self) -> Result<(), StandardnessError> {
        self.pubkey.strict_signature_check()?;
        Ok(())
    }

    pub fn equal(&self, other: &SingleSignatureFulfillment) -> bool { self == other }

    /// Refuses a fulfillment whose signature has already been filled (§4.5); extras are empty.
    pub fn sign<T: SigHashInput>(&mut self, ctx: &SignContext<T>) -> Result<(), SignError> {
        if !self.signature.is_zero() {
            return Err(SignError::FulfillmentDoubleSign);
        }
        let digest = digest_for_version(ctx.transaction, ctx.transaction_version, &[]);
        self.signature = self.pubkey.sign(ctx.private_key, &digest.0)?;
        Ok(())
    }
}

impl Encodable for SingleSignatureFulfillment {
    fn encode<W: WriteCodec>(&self, w: &mut W) {
        self.pubkey.encode(w);
        self.signature.encode(w);
    }
}

impl Decodable for SingleSignatureFulfillment {
    fn decode<'a, R: ReadCodec<'a>>(r: &mut R) -> Result<Self, CodecError> {
        Ok(SingleSignatureFulfillment { pubkey: PublicKey::decode(r)?, signature: Signature::decode(r)? })
    }
}
