//! Settlement payload packing.

use crate::error::ClientError;

/// Length of a bare safe transaction hash: 32 bytes of hex, no prefix.
const SAFE_TX_HASH_LENGTH: usize = 64;

/// Pack the fields of a prepared transfer into the hex payload the
/// settlement layer expects:
/// safe tx hash (64) ‖ value as 32-byte hex ‖ gas as 32-byte hex ‖
/// to-address ‖ call data hex.
pub fn hash_payload_to_hex(
    safe_tx_hash: &str,
    ether_value: u64,
    safe_tx_gas: u64,
    to_address: &str,
    data: &[u8],
) -> Result<String, ClientError> {
    if safe_tx_hash.len() != SAFE_TX_HASH_LENGTH {
        return Err(ClientError::Contract(format!(
            "safe tx hash must be {SAFE_TX_HASH_LENGTH} hex chars, got {}",
            safe_tx_hash.len()
        )));
    }
    Ok(format!(
        "{safe_tx_hash}{ether_value:064x}{safe_tx_gas:064x}{to_address}{}",
        hex::encode(data)
    ))
}
