//! JSON Web Key helpers shared by the key types.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::key::Jwk;
use crate::provider::{ProviderError, ProviderResult};
use crate::usages::KeyUsage;

/// base64url without padding, as JWK members require.
pub(super) fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a required binary member.
pub(super) fn decode(member: &str, value: Option<&String>) -> ProviderResult<Vec<u8>> {
    let value = value
        .ok_or_else(|| ProviderError::Data(format!("JWK is missing the '{member}' member")))?;
    URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| ProviderError::Data(format!("JWK member '{member}' is not base64url: {e}")))
}

pub(super) fn expect_kty(jwk: &Jwk, kty: &str) -> ProviderResult<()> {
    if jwk.kty != kty {
        return Err(ProviderError::Data(format!(
            "JWK kty must be '{kty}' (got '{}')",
            jwk.kty
        )));
    }
    Ok(())
}

/// An `alg` member, when present, must name the expected algorithm.
pub(super) fn expect_alg(jwk: &Jwk, alg: &str) -> ProviderResult<()> {
    match jwk.alg.as_deref() {
        Some(found) if found != alg => Err(ProviderError::Data(format!(
            "JWK alg must be '{alg}' (got '{found}')"
        ))),
        _ => Ok(()),
    }
}

/// `ext` and `key_ops` must allow what the import asks for.
pub(super) fn check_import(jwk: &Jwk, extractable: bool, usages: &[KeyUsage]) -> ProviderResult<()> {
    if extractable && jwk.ext == Some(false) {
        return Err(ProviderError::Data(
            "JWK is marked non-extractable but an extractable key was requested".into(),
        ));
    }
    if let Some(ops) = &jwk.key_ops {
        if let Some(missing) = usages.iter().find(|u| !ops.contains(u)) {
            return Err(ProviderError::Data(format!(
                "JWK key_ops does not allow '{missing}'"
            )));
        }
    }
    Ok(())
}

/// Serialized form used when a JWK is wrapped.
pub(super) fn to_bytes(jwk: &Jwk) -> ProviderResult<Vec<u8>> {
    serde_json::to_vec(jwk).map_err(|e| ProviderError::Operation(format!("JWK encoding: {e}")))
}

pub(super) fn from_bytes(bytes: &[u8]) -> ProviderResult<Jwk> {
    serde_json::from_slice(bytes).map_err(|e| ProviderError::Data(format!("invalid JWK: {e}")))
}
