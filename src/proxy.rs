//! Proxy wrappers (C6, §4.6): tag-prefixed envelopes over Condition/Fulfillment, with universal
//! marshal/unmarshal across CodecA, CodecR, and JSON.

use crate::condition::{time_lock::TimeLockCondition, Condition};
use crate::context::{FulfillContext, SignContext, SigHashInput};
use crate::encoding::{CodecAReader, CodecAWriter, CodecError, CodecRReader, CodecRWriter, ReadCodec, WriteCodec};
use crate::error::{FulfillError, SignError, StandardnessError, StructuralError};
use crate::fulfillment::{atomic_swap::AtomicSwapVariant, Fulfillment};
use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

fn encode_proxy<W: WriteCodec + Default>(tag: u8, payload: Vec<u8>) -> Vec<u8> {
    let mut w = W::default();
    w.write_u8(tag);
    w.write_bytes(&payload);
    w.finish()
}

fn decode_proxy<'a, R: ReadCodec<'a>>(bytes: &'a [u8]) -> Result<(u8, &'a [u8]), CodecError> {
    let mut r = R::from_bytes(bytes);
    let tag = r.read_u8()?;
    let payload = r.read_bytes()?;
    r.finish()?;
    Ok((tag, payload))
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConditionProxy(pub Condition);

impl ConditionProxy {
    pub fn marshal_codec_a(&self) -> Vec<u8> {
        let mut payload_writer = CodecAWriter::default();
        self.0.marshal(&mut payload_writer);
        encode_proxy::<CodecAWriter>(self.0.tag(), payload_writer.finish())
    }

    pub fn marshal_codec_r(&self) -> Vec<u8> {
        let mut payload_writer = CodecRWriter::default();
        self.0.marshal(&mut payload_writer);
        encode_proxy::<CodecRWriter>(self.0.tag(), payload_writer.finish())
    }

    pub fn unmarshal_codec_a(bytes: &[u8]) -> Result<Self, CodecError> {
        let (tag, payload) = decode_proxy::<CodecAReader>(bytes)?;
        Ok(ConditionProxy(Condition::unmarshal_payload::<CodecAReader>(tag, payload)?))
    }

    pub fn unmarshal_codec_r(bytes: &[u8]) -> Result<Self, CodecError> {
        let (tag, payload) = decode_proxy::<CodecRReader>(bytes)?;
        Ok(ConditionProxy(Condition::unmarshal_payload::<CodecRReader>(tag, payload)?))
    }

    pub fn unlock_hash(&self) -> crate::unlock_hash::UnlockHash { self.0.unlock_hash() }

    pub fn is_standard(&self) -> Result<(), StandardnessError> { self.0.is_standard() }

    pub fn fulfillable<T: SigHashInput>(&self, ctx: &FulfillContext<T>) -> bool { self.0.fulfillable(ctx) }

    pub fn fulfill<T: SigHashInput>(&self, fulfillment: &FulfillmentProxy, ctx: &FulfillContext<T>) -> Result<(), FulfillError> {
        self.0.fulfill(&fulfillment.0, ctx)
    }

    fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        let tag = self.0.tag();
        let data = match &self.0 {
            Condition::Nil => None,
            Condition::UnlockHash(c) => Some(serde_json::to_value(c)?),
            Condition::AtomicSwap(c) => Some(serde_json::to_value(c)?),
            Condition::TimeLock(c) => {
                let mut obj = Map::new();
                obj.insert("locktime".to_string(), Value::from(c.lock_time));
                obj.insert("condition".to_string(), ConditionProxy((*c.inner).clone()).to_json_value()?);
                Some(Value::Object(obj))
            }
            Condition::MultiSignature(c) => Some(serde_json::to_value(c)?),
            Condition::Unknown(u) => return Err(DeError::custom(StructuralError::UnknownConditionType(u.tag))),
        };

        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::from(tag));
        if let Some(data) = data {
            if data != Value::Object(Map::new()) {
                obj.insert("data".to_string(), data);
            }
        }
        Ok(Value::Object(obj))
    }

    fn from_json_value(value: Value) -> Result<Self, serde_json::Error> {
        let obj = value.as_object().ok_or_else(|| DeError::custom("expected a JSON object"))?;
        let tag = obj
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| DeError::custom("missing \"type\""))? as u8;
        let data = obj.get("data").cloned().unwrap_or_else(|| Value::Object(Map::new()));

        let condition = match tag {
            0 => Condition::Nil,
            1 => Condition::UnlockHash(serde_json::from_value(data)?),
            2 => Condition::AtomicSwap(serde_json::from_value(data)?),
            3 => {
                let data_obj = data.as_object().ok_or_else(|| DeError::custom("expected TimeLock data object"))?;
                let lock_time = data_obj
                    .get("locktime")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| DeError::custom("missing \"locktime\""))?;
                let inner_value = data_obj
                    .get("condition")
                    .cloned()
                    .ok_or_else(|| DeError::custom("missing \"condition\""))?;
                let inner = ConditionProxy::from_json_value(inner_value)?;
                Condition::TimeLock(Box::new(TimeLockCondition::new(lock_time, inner.0)))
            }
            4 => Condition::MultiSignature(serde_json::from_value(data)?),
            other => return Err(DeError::custom(StructuralError::UnknownConditionType(other))),
        };
        Ok(ConditionProxy(condition))
    }
}

impl Serialize for ConditionProxy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().map_err(S::Error::custom)?.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConditionProxy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ConditionProxy::from_json_value(value).map_err(D::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FulfillmentProxy(pub Fulfillment);

impl FulfillmentProxy {
    pub fn marshal_codec_a(&self) -> Vec<u8> {
        let mut payload_writer = CodecAWriter::default();
        self.0.marshal(&mut payload_writer);
        encode_proxy::<CodecAWriter>(self.0.tag(), payload_writer.finish())
    }

    pub fn marshal_codec_r(&self) -> Vec<u8> {
        let mut payload_writer = CodecRWriter::default();
        self.0.marshal(&mut payload_writer);
        encode_proxy::<CodecRWriter>(self.0.tag(), payload_writer.finish())
    }

    pub fn unmarshal_codec_a(bytes: &[u8]) -> Result<Self, CodecError> {
        let (tag, payload) = decode_proxy::<CodecAReader>(bytes)?;
        Ok(FulfillmentProxy(Fulfillment::unmarshal_payload::<CodecAReader>(tag, payload)?))
    }

    pub fn unmarshal_codec_r(bytes: &[u8]) -> Result<Self, CodecError> {
        let (tag, payload) = decode_proxy::<CodecRReader>(bytes)?;
        Ok(FulfillmentProxy(Fulfillment::unmarshal_payload::<CodecRReader>(tag, payload)?))
    }

    pub fn is_standard(&self) -> Result<(), StandardnessError> { self.0.is_standard() }

    pub fn sign<T: SigHashInput>(&mut self, ctx: &SignContext<T>) -> Result<(), SignError> { self.0.sign(ctx) }

    fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        let tag = self.0.tag();
        let data = match &self.0 {
            Fulfillment::Nil => None,
            Fulfillment::SingleSignature(f) => Some(serde_json::to_value(f)?),
            Fulfillment::AtomicSwap(f) => Some(serde_json::to_value(f)?),
            Fulfillment::LegacyAtomicSwap(f) => Some(serde_json::to_value(f)?),
            Fulfillment::MultiSignature(f) => Some(serde_json::to_value(f)?),
            Fulfillment::Unknown(u) => return Err(DeError::custom(StructuralError::UnknownFulfillmentType(u.tag))),
        };
        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::from(tag));
        if let Some(data) = data {
            if data != Value::Object(Map::new()) {
                obj.insert("data".to_string(), data);
            }
        }
        Ok(Value::Object(obj))
    }

    fn from_json_value(value: Value) -> Result<Self, serde_json::Error> {
        let obj = value.as_object().ok_or_else(|| DeError::custom("expected a JSON object"))?;
        let tag = obj
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| DeError::custom("missing \"type\""))? as u8;
        let data = obj.get("data").cloned().unwrap_or_else(|| Value::Object(Map::new()));

        let fulfillment = match tag {
            0 => Fulfillment::Nil,
            1 => Fulfillment::SingleSignature(serde_json::from_value(data)?),
            2 => match crate::fulfillment::atomic_swap::classify_json(data)? {
                AtomicSwapVariant::Current(f) => Fulfillment::AtomicSwap(f),
                AtomicSwapVariant::Legacy(f) => Fulfillment::LegacyAtomicSwap(f),
            },
            3 => Fulfillment::MultiSignature(serde_json::from_value(data)?),
            other => return Err(DeError::custom(StructuralError::UnknownFulfillmentType(other))),
        };
        Ok(FulfillmentProxy(fulfillment))
    }
}

impl Serialize for FulfillmentProxy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().map_err(S::Error::custom)?.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FulfillmentProxy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        FulfillmentProxy::from_json_value(value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::UnlockHashCondition;
    use crate::hash::Hash;
    use crate::unlock_hash::{UnlockHash, UnlockHashType};

    #[test]
    fn nil_condition_json_has_no_data_field() {
        let proxy = ConditionProxy(Condition::Nil);
        let value = serde_json::to_value(&proxy).unwrap();
        assert_eq!(value, serde_json::json!({"type": 0}));
    }

    #[test]
    fn unlock_hash_condition_json_round_trips() {
        let target = UnlockHash::new(UnlockHashType::PubKey, Hash([7; 32]));
        let proxy = ConditionProxy(Condition::UnlockHash(UnlockHashCondition::new(target)));
        let value = serde_json::to_value(&proxy).unwrap();
        let back: ConditionProxy = serde_json::from_value(value).unwrap();
        assert!(back.0.equal(&proxy.0));
    }

    #[test]
    fn unknown_json_type_is_a_hard_error() {
        let value = serde_json::json!({"type": 250});
        let result: Result<ConditionProxy, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn binary_proxy_round_trips_codec_a_and_r() {
        let target = UnlockHash::new(UnlockHashType::PubKey, Hash([9; 32]));
        let proxy = ConditionProxy(Condition::UnlockHash(UnlockHashCondition::new(target)));

        let a = proxy.marshal_codec_a();
        let back_a = ConditionProxy::unmarshal_codec_a(&a).unwrap();
        assert!(back_a.0.equal(&proxy.0));

        let r = proxy.marshal_codec_r();
        let back_r = ConditionProxy::unmarshal_codec_r(&r).unwrap();
        assert!(back_r.0.equal(&proxy.0));
    }

    #[test]
    fn unknown_binary_tag_preserves_raw_bytes() {
        use crate::condition::UnknownCondition;
        let proxy = ConditionProxy(Condition::Unknown(UnknownCondition { tag: 250, payload: vec![1, 2, 3] }));
        let a = proxy.marshal_codec_a();
        let back = ConditionProxy::unmarshal_codec_a(&a).unwrap();
        assert!(back.0.equal(&proxy.0));
    }
}
