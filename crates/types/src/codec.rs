//! ABI wire encoding of an intent, the payload attached to governed operations.
//!
//! Layout is the static tuple
//! `(uint64, uint64, uint32, uint32, bytes32[4], uint8, uint256, bytes32)`,
//! eleven 32-byte words with no offsets.

use alloy_primitives::{FixedBytes, U256};
use alloy_sol_types::{sol, SolType};
use cosmwasm_std::Uint256;

use crate::{Intent, IntentError, RouteId, MAX_ROUTES};

sol! {
    struct IntentPayload {
        uint64 startStep;
        uint64 endStep;
        uint32 minDelaySteps;
        uint32 createdAtStep;
        bytes32[4] allowedRoutes;
        uint8 allowedRouteCount;
        uint256 minOutput;
        bytes32 salt;
    }
}

/// Length of an encoded intent in bytes
pub const ENCODED_INTENT_LEN: usize = 11 * 32;

impl Intent {
    pub fn encode(&self) -> Vec<u8> {
        let payload = IntentPayload {
            startStep: self.start_step,
            endStep: self.end_step,
            minDelaySteps: self.min_delay_steps,
            createdAtStep: self.created_at_step,
            allowedRoutes: self.allowed_routes.map(|route| FixedBytes(route.0)),
            allowedRouteCount: self.allowed_route_count,
            minOutput: U256::from_be_bytes(self.min_output.to_be_bytes()),
            salt: FixedBytes(self.salt),
        };
        <IntentPayload as SolType>::abi_encode(&payload)
    }

    /// Strictly decode an encoded intent; shape rules are not checked here
    pub fn decode(bytes: &[u8]) -> Result<Self, IntentError> {
        if bytes.len() != ENCODED_INTENT_LEN {
            return Err(IntentError::MalformedPayload {
                reason: format!(
                    "expected {ENCODED_INTENT_LEN} bytes, got {}",
                    bytes.len()
                ),
            });
        }

        check_padding(bytes)?;

        let payload = <IntentPayload as SolType>::abi_decode(bytes, true).map_err(|e| {
            IntentError::MalformedPayload {
                reason: e.to_string(),
            }
        })?;

        let mut allowed_routes = [RouteId::ZERO; MAX_ROUTES];
        for (slot, route) in allowed_routes.iter_mut().zip(payload.allowedRoutes.iter()) {
            *slot = RouteId(route.0);
        }

        Ok(Intent {
            start_step: payload.startStep,
            end_step: payload.endStep,
            min_delay_steps: payload.minDelaySteps,
            created_at_step: payload.createdAtStep,
            allowed_routes,
            allowed_route_count: payload.allowedRouteCount,
            min_output: Uint256::from_be_bytes(payload.minOutput.to_be_bytes::<32>()),
            salt: payload.salt.0,
        })
    }
}

/// Narrow integer words must carry zero high bytes: (word index, value width)
const NARROW_WORDS: [(usize, usize); 5] = [(0, 8), (1, 8), (2, 4), (3, 4), (8, 1)];

fn check_padding(bytes: &[u8]) -> Result<(), IntentError> {
    for (word, width) in NARROW_WORDS {
        let start = word * 32;
        let padding = &bytes[start..start + 32 - width];
        if padding.iter().any(|b| *b != 0) {
            return Err(IntentError::MalformedPayload {
                reason: format!("non-zero padding in word {word}"),
            });
        }
    }
    Ok(())
}

/// Interpret a hook payload: empty means an ungoverned operation
pub fn decode_payload(bytes: &[u8]) -> Result<Option<Intent>, IntentError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    Intent::decode(bytes).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Intent {
        Intent::builder()
            .window(1_000, 1_200)
            .min_delay_steps(7)
            .routes([RouteId([1u8; 32]), RouteId([2u8; 32]), RouteId([3u8; 32])])
            .min_output(Uint256::from(123_456_789u128))
            .salt([0xee; 32])
            .build()
            .unwrap()
    }

    #[test]
    fn encodes_eleven_words() {
        let encoded = sample().encode();
        assert_eq!(encoded.len(), ENCODED_INTENT_LEN);

        // startStep is right-aligned in the first word
        assert_eq!(&encoded[..24], &[0u8; 24]);
        assert_eq!(&encoded[24..32], &1_000u64.to_be_bytes());
        // allowedRouteCount lives in word 8
        assert_eq!(encoded[8 * 32 + 31], 3);
    }

    #[test]
    fn decode_restores_every_field() {
        let mut intent = sample();
        intent.created_at_step = 1_050;
        assert_eq!(Intent::decode(&intent.encode()).unwrap(), intent);
    }

    #[test]
    fn empty_payload_is_ungoverned() {
        assert_eq!(decode_payload(&[]), Ok(None));
    }

    #[test]
    fn rejects_truncated_payload() {
        let encoded = sample().encode();
        let err = decode_payload(&encoded[..ENCODED_INTENT_LEN - 1]).unwrap_err();
        assert!(matches!(err, IntentError::MalformedPayload { .. }));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut encoded = sample().encode();
        encoded.push(0);
        assert!(matches!(
            Intent::decode(&encoded),
            Err(IntentError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn rejects_dirty_padding() {
        let mut encoded = sample().encode();
        // high byte of the uint8 route-count word
        encoded[8 * 32] = 1;
        assert!(matches!(
            Intent::decode(&encoded),
            Err(IntentError::MalformedPayload { .. })
        ));
    }
}
