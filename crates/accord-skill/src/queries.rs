//! Bulk-data queries.

/// GraphQL query for the token-pair dataset, paged by `first`.
pub fn large_data_query(first: usize) -> String {
    format!(
        "{{
  pairs(first: {first}) {{
    id
    token0 {{
      id
      symbol
      name
    }}
    token1 {{
      id
      symbol
      name
    }}
    reserve0
    reserve1
    totalSupply
    reserveETH
    reserveUSD
    trackedReserveETH
    trackedReserveUSD
    token0Price
    token1Price
    volumeToken0
    volumeToken1
    volumeUSD
    txCount
    createdAtTimestamp
    createdAtBlockNumber
  }}
}}"
    )
}

/// Wrap a query as the POST body the endpoint expects: a `query` key,
/// encoded as UTF-8 JSON bytes.
pub fn to_content(query: &str) -> Vec<u8> {
    serde_json::json!({ "query": query }).to_string().into_bytes()
}
