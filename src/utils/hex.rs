//! Hex quantity decoding for RPC responses.
//!
//! Quantities follow the Ethereum JSON-RPC encoding: `0x` prefix, no leading
//! zero digits, at most 256 bits.

use crate::utils::error::HexError;
use alloy_primitives::{TxHash, U256};
use std::str::FromStr;

/// Decode a hex-encoded quantity into a `U256`
///
/// **Public** - used by the provider for every numeric response
///
/// # Errors
/// Returns `HexError` when the string is not a valid quantity
pub fn decode_quantity(value: &str) -> Result<U256, HexError> {
    if value.is_empty() {
        return Err(HexError::Empty);
    }

    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or(HexError::MissingPrefix)?;

    if digits.is_empty() {
        return Err(HexError::EmptyNumber);
    }
    // U256's radix parser skips '_' separators, so check every digit first
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidDigit(bad));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(HexError::LeadingZero);
    }
    if digits.len() > 64 {
        return Err(HexError::Overflow);
    }

    U256::from_str_radix(digits, 16).map_err(|_| HexError::Overflow)
}

/// Normalize transaction hash to include 0x prefix and parse it
///
/// **Public** - used by the CLI to accept hashes with or without prefix
pub fn parse_tx_hash(tx_hash: &str) -> Result<TxHash, HexError> {
    let normalized = if tx_hash.starts_with("0x") {
        tx_hash.to_string()
    } else {
        format!("0x{}", tx_hash)
    };

    TxHash::from_str(&normalized).map_err(|e| HexError::InvalidHash {
        value: tx_hash.to_string(),
        reason: e.to_string(),
    })
}
