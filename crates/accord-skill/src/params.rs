//! Transfer parameters for transaction preparation.

use crate::ports::SafeTxRequest;

pub const GNOSIS_CHAIN_ID: &str = "gnosis";
pub const SAFE_GAS: u64 = 0;
pub const ETHER_VALUE: u64 = 1;
pub const TO_ADDRESS: &str = "0xbDcc35821DAA3a15047615773E14c77a1042d317";
pub const TX_DATA: &[u8] = b"0x";

/// Parameters of the transfer the tx-preparation round prepares.
#[derive(Debug, Clone)]
pub struct TransferParams {
    pub safe_contract_address: String,
    pub to_address: String,
    pub value: u64,
    pub safe_tx_gas: u64,
    pub chain_id: String,
    pub data: Vec<u8>,
}

impl Default for TransferParams {
    fn default() -> Self {
        Self {
            safe_contract_address: String::new(),
            to_address: TO_ADDRESS.to_owned(),
            value: ETHER_VALUE,
            safe_tx_gas: SAFE_GAS,
            chain_id: GNOSIS_CHAIN_ID.to_owned(),
            data: TX_DATA.to_vec(),
        }
    }
}

impl TransferParams {
    pub fn safe_tx_request(&self) -> SafeTxRequest {
        SafeTxRequest {
            contract_address: self.safe_contract_address.clone(),
            to_address: self.to_address.clone(),
            value: self.value,
            data: self.data.clone(),
            safe_tx_gas: self.safe_tx_gas,
            chain_id: self.chain_id.clone(),
        }
    }
}
