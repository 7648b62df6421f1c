//! Typed method-surface tests against a mocked node.

use alloy::primitives::{Address, B256, U256, U64};
use mockito::Matcher;
use serde_json::json;

use eth_web3::models::types::{
    BlockParameter, BlockTransactions, CallRequest, LogFilter, TxStatus,
};
use eth_web3::{Client, Web3Error};

use crate::init_logger;

const ADDRESS: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";
const TX_HASH: &str = "0xc008e9f9bb92057dd0035496fbf4fb54f66b4b18b370928e46d6603933054d5a";
const BLOCK_HASH: &str = "0x88fadbb673928c61b9ede3694ae0589ac77ae38ec90a24a6e12e83f42f18c7e8";

fn address() -> Address {
    ADDRESS.parse().unwrap()
}

fn tx_hash() -> B256 {
    TX_HASH.parse().unwrap()
}

fn result_body(id: u64, result: serde_json::Value) -> String {
    json!({"jsonrpc": "2.0", "id": id, "result": result}).to_string()
}

#[tokio::test]
async fn get_balance_decodes_a_hex_quantity() {
    init_logger();
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getBalance",
            "params": [ADDRESS, "latest"],
        })))
        .with_body(result_body(1, json!("0xde0b6b3a7640000")))
        .create_async()
        .await;

    let client = Client::new(server.url());
    let balance = client
        .eth()
        .get_balance(address(), BlockParameter::Latest)
        .await
        .unwrap();

    assert_eq!(balance, U256::from(10u64).pow(U256::from(18u64)));
    mock.assert_async().await;
}

#[tokio::test]
async fn balances_beyond_64_bits_do_not_overflow() {
    let mut server = mockito::Server::new_async().await;

    // ~1.2 million ether in wei, far past u64.
    let _mock = server
        .mock("POST", "/")
        .with_body(result_body(1, json!("0xfe1c215e8f838e00000")))
        .create_async()
        .await;

    let client = Client::new(server.url());
    let balance = client
        .eth()
        .get_balance(address(), BlockParameter::Latest)
        .await
        .unwrap();

    assert_eq!(
        balance,
        U256::from_str_radix("fe1c215e8f838e00000", 16).unwrap()
    );
}

#[tokio::test]
async fn block_number_and_gas_price() {
    let mut server = mockito::Server::new_async().await;

    let _number = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "eth_blockNumber"})))
        .with_body(result_body(1, json!("0x112a880")))
        .create_async()
        .await;
    let _price = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "eth_gasPrice"})))
        .with_body(result_body(2, json!("0x3b9aca00")))
        .create_async()
        .await;

    let client = Client::new(server.url());
    assert_eq!(client.eth().block_number().await.unwrap(), 18_000_000);
    assert_eq!(
        client.eth().gas_price().await.unwrap(),
        U256::from(1_000_000_000u64)
    );
}

#[tokio::test]
async fn transaction_count_uses_the_block_parameter() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getTransactionCount",
            "params": [ADDRESS, "pending"],
        })))
        .with_body(result_body(1, json!("0x2a")))
        .create_async()
        .await;

    let client = Client::new(server.url());
    let nonce = client
        .eth()
        .get_transaction_count(address(), BlockParameter::Pending)
        .await
        .unwrap();

    assert_eq!(nonce, 42);
    mock.assert_async().await;
}

fn block_fixture(full: bool) -> serde_json::Value {
    let transactions = if full {
        json!([{
            "hash": TX_HASH,
            "nonce": "0x1",
            "blockHash": BLOCK_HASH,
            "blockNumber": "0x10",
            "transactionIndex": "0x0",
            "from": ADDRESS,
            "to": "0x000000000000000000000000000000000000dead",
            "value": "0xde0b6b3a7640000",
            "gas": "0x5208",
            "gasPrice": "0x3b9aca00",
            "input": "0x"
        }])
    } else {
        json!([TX_HASH])
    };

    json!({
        "number": "0x10",
        "hash": BLOCK_HASH,
        "parentHash": "0x71d5e7c8ff9ea737034c16e333a75575a4a94d29482e0c2b88f0a6a8369c1812",
        "nonce": "0x0000000000000000",
        "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
        "logsBloom": "0x00",
        "transactionsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "stateRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "receiptsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "miner": ADDRESS,
        "difficulty": "0x0",
        "totalDifficulty": "0xc70d815d562d3cfa955",
        "extraData": "0x",
        "size": "0x220",
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x5208",
        "timestamp": "0x64c8d2a4",
        "baseFeePerGas": "0x3b9aca00",
        "transactions": transactions,
        "uncles": []
    })
}

#[tokio::test]
async fn get_block_by_number_with_hashes() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getBlockByNumber",
            "params": ["0x10", false],
        })))
        .with_body(result_body(1, block_fixture(false)))
        .create_async()
        .await;

    let client = Client::new(server.url());
    let block = client
        .eth()
        .get_block_by_number(BlockParameter::Number(0x10), false)
        .await
        .unwrap()
        .expect("block must exist");

    assert_eq!(block.number, Some(U64::from(0x10u64)));
    assert_eq!(block.hash, Some(BLOCK_HASH.parse::<B256>().unwrap()));
    assert_eq!(block.gas_used, U256::from(21_000u64));
    assert!(matches!(block.transactions, BlockTransactions::Hashes(ref h) if h.len() == 1));
    mock.assert_async().await;
}

#[tokio::test]
async fn get_block_by_hash_with_full_transactions() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getBlockByHash",
            "params": [BLOCK_HASH, true],
        })))
        .with_body(result_body(1, block_fixture(true)))
        .create_async()
        .await;

    let client = Client::new(server.url());
    let block = client
        .eth()
        .get_block_by_hash(BLOCK_HASH.parse().unwrap(), true)
        .await
        .unwrap()
        .expect("block must exist");

    match block.transactions {
        BlockTransactions::Full(transactions) => {
            assert_eq!(transactions.len(), 1);
            assert_eq!(transactions[0].hash, tx_hash());
            assert_eq!(transactions[0].from, address());
        }
        BlockTransactions::Hashes(_) => panic!("expected full transactions"),
    }
}

#[tokio::test]
async fn missing_block_is_none() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_body(result_body(1, json!(null)))
        .create_async()
        .await;

    let client = Client::new(server.url());
    let block = client
        .eth()
        .get_block_by_number(BlockParameter::Number(u64::MAX >> 1), false)
        .await
        .unwrap();

    assert!(block.is_none());
}

#[tokio::test]
async fn get_transaction_by_hash_decodes_typed_fields() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getTransactionByHash",
            "params": [TX_HASH],
        })))
        .with_body(result_body(
            1,
            json!({
                "hash": TX_HASH,
                "nonce": "0x653b",
                "blockHash": BLOCK_HASH,
                "blockNumber": "0xa74fde",
                "transactionIndex": "0x88",
                "from": ADDRESS,
                "to": "0xdac17f958d2ee523a2206206994597c13d831ec7",
                "value": "0x0",
                "gas": "0x30d40",
                "gasPrice": "0x1e449a99b8",
                "input": "0xa9059cbb"
            }),
        ))
        .create_async()
        .await;

    let client = Client::new(server.url());
    let tx = client
        .eth()
        .get_transaction_by_hash(tx_hash())
        .await
        .unwrap()
        .expect("transaction must exist");

    assert_eq!(tx.hash, tx_hash());
    assert_eq!(tx.nonce, U64::from(0x653bu64));
    assert_eq!(tx.block_number, Some(U64::from(0xa74fdeu64)));
    assert_eq!(tx.gas_price, Some(U256::from(0x1e449a99b8u64)));
    assert_eq!(tx.input.as_ref(), [0xa9, 0x05, 0x9c, 0xbb]);
}

#[tokio::test]
async fn unknown_transaction_is_none() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_body(result_body(1, json!(null)))
        .create_async()
        .await;

    let client = Client::new(server.url());
    assert!(client
        .eth()
        .get_transaction_by_hash(tx_hash())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn receipt_status_decodes_the_two_literals() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_body(result_body(
            1,
            json!({
                "transactionHash": TX_HASH,
                "transactionIndex": "0x1",
                "blockHash": BLOCK_HASH,
                "blockNumber": "0xa74fde",
                "from": ADDRESS,
                "to": "0x000000000000000000000000000000000000dead",
                "cumulativeGasUsed": "0x56c81b",
                "gasUsed": "0xa0f9",
                "contractAddress": null,
                "status": "0x1",
                "effectiveGasPrice": "0x1e449a99b8",
                "logs": []
            }),
        ))
        .create_async()
        .await;

    let client = Client::new(server.url());
    let receipt = client
        .eth()
        .get_transaction_receipt(tx_hash())
        .await
        .unwrap()
        .expect("receipt must exist");

    assert_eq!(receipt.status, Some(TxStatus::Success));
    assert!(receipt.status.unwrap().is_success());
    assert_eq!(receipt.gas_used, U256::from(0xa0f9u64));
    assert_eq!(receipt.contract_address, None);
}

#[tokio::test]
async fn unrecognized_receipt_status_fails_the_decode() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_body(result_body(
            1,
            json!({
                "transactionHash": TX_HASH,
                "transactionIndex": "0x1",
                "blockHash": BLOCK_HASH,
                "blockNumber": "0xa74fde",
                "from": ADDRESS,
                "cumulativeGasUsed": "0x0",
                "gasUsed": "0x0",
                "status": "0x2"
            }),
        ))
        .create_async()
        .await;

    let client = Client::new(server.url());
    let error = client
        .eth()
        .get_transaction_receipt(tx_hash())
        .await
        .unwrap_err();

    assert!(matches!(error, Web3Error::Decode(_)), "got {error:?}");
}

#[tokio::test]
async fn send_raw_transaction_returns_the_hash() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_sendRawTransaction",
            "params": ["0xdeadbeef"],
        })))
        .with_body(result_body(1, json!(TX_HASH)))
        .create_async()
        .await;

    let client = Client::new(server.url());
    let raw = alloy::primitives::Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]);
    let hash = client.eth().send_raw_transaction(&raw).await.unwrap();

    assert_eq!(hash, tx_hash());
    mock.assert_async().await;
}

#[tokio::test]
async fn estimate_gas_and_call_serialize_the_call_object() {
    let mut server = mockito::Server::new_async().await;

    let estimate = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_estimateGas",
            "params": [{"from": ADDRESS, "to": "0x000000000000000000000000000000000000dead", "value": "0x1"}],
        })))
        .with_body(result_body(1, json!("0x5208")))
        .create_async()
        .await;
    let call = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_call",
            "params": [{"to": "0x000000000000000000000000000000000000dead", "data": "0x70a08231"}, "latest"],
        })))
        .with_body(result_body(2, json!("0x000000000000000000000000000000000000000000000000000000000000002a")))
        .create_async()
        .await;

    let client = Client::new(server.url());

    let request = CallRequest {
        from: Some(address()),
        to: Some("0x000000000000000000000000000000000000dead".parse().unwrap()),
        value: Some(U256::from(1u64)),
        ..Default::default()
    };
    assert_eq!(client.eth().estimate_gas(&request).await.unwrap(), 21_000);

    let read = CallRequest {
        to: Some("0x000000000000000000000000000000000000dead".parse().unwrap()),
        data: Some(vec![0x70, 0xa0, 0x82, 0x31].into()),
        ..Default::default()
    };
    let output = client
        .eth()
        .call(&read, BlockParameter::Latest)
        .await
        .unwrap();
    assert_eq!(output.len(), 32);
    assert_eq!(output[31], 0x2a);

    estimate.assert_async().await;
    call.assert_async().await;
}

#[tokio::test]
async fn get_logs_applies_the_filter() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getLogs",
            "params": [{"fromBlock": "0xa", "toBlock": "latest", "address": ADDRESS}],
        })))
        .with_body(result_body(
            1,
            json!([{
                "address": ADDRESS,
                "topics": ["0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"],
                "data": "0x00000000000000000000000000000000000000000000000000000004a817c800",
                "blockNumber": "0xa02bdf",
                "blockHash": BLOCK_HASH,
                "transactionHash": TX_HASH,
                "transactionIndex": "0x3",
                "logIndex": "0x0",
                "removed": false
            }]),
        ))
        .create_async()
        .await;

    let client = Client::new(server.url());
    let filter = LogFilter {
        from_block: Some(BlockParameter::Number(10)),
        to_block: Some(BlockParameter::Latest),
        address: Some(address()),
        topics: None,
    };
    let logs = client.eth().get_logs(&filter).await.unwrap();

    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].address, address());
    assert_eq!(logs[0].topics.len(), 1);
    assert_eq!(logs[0].block_number, Some(U64::from(0xa02bdfu64)));
    mock.assert_async().await;
}

#[tokio::test]
async fn storage_code_and_version_methods() {
    let mut server = mockito::Server::new_async().await;

    let _storage = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getStorageAt",
            "params": [ADDRESS, "0x1", "latest"],
        })))
        .with_body(result_body(
            1,
            json!("0x000000000000000000000000000000000000000010a596ae049e066d4991945c"),
        ))
        .create_async()
        .await;
    let _code = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "eth_getCode"})))
        .with_body(result_body(2, json!("0x6080")))
        .create_async()
        .await;
    let _net = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "net_version"})))
        .with_body(result_body(3, json!("1")))
        .create_async()
        .await;
    let _version = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "web3_clientVersion"})))
        .with_body(result_body(4, json!("Geth/v1.13.0")))
        .create_async()
        .await;
    let _chain = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "eth_chainId"})))
        .with_body(result_body(5, json!("0x1")))
        .create_async()
        .await;

    let client = Client::new(server.url());

    let word = client
        .eth()
        .get_storage_at(address(), U256::from(1u64), BlockParameter::Latest)
        .await
        .unwrap();
    assert_eq!(
        U256::from_be_slice(word.as_slice()),
        U256::from_str_radix("10a596ae049e066d4991945c", 16).unwrap()
    );

    let code = client
        .eth()
        .get_code(address(), BlockParameter::Latest)
        .await
        .unwrap();
    assert_eq!(code.as_ref(), [0x60, 0x80]);

    assert_eq!(client.eth().net_version().await.unwrap(), "1");
    assert_eq!(client.eth().client_version().await.unwrap(), "Geth/v1.13.0");
    assert_eq!(client.eth().chain_id().await.unwrap(), 1);
}

#[tokio::test]
async fn fee_history_and_priority_fee() {
    let mut server = mockito::Server::new_async().await;

    let _history = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_feeHistory",
            "params": ["0x4", "latest", [25.0, 75.0]],
        })))
        .with_body(result_body(
            1,
            json!({
                "oldestBlock": "0x112a87c",
                "baseFeePerGas": ["0x3b9aca00", "0x3ba18a65"],
                "gasUsedRatio": [0.45, 0.52],
                "reward": [["0x5f5e100", "0x77359400"], ["0x5f5e100", "0x77359400"]]
            }),
        ))
        .create_async()
        .await;
    let _tip = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "eth_maxPriorityFeePerGas"})))
        .with_body(result_body(2, json!("0x5f5e100")))
        .create_async()
        .await;

    let client = Client::new(server.url());

    let history = client
        .eth()
        .fee_history(4, BlockParameter::Latest, &[25.0, 75.0])
        .await
        .unwrap();
    assert_eq!(history.oldest_block, U64::from(0x112a87cu64));
    assert_eq!(history.base_fee_per_gas.len(), 2);
    assert_eq!(history.gas_used_ratio, vec![0.45, 0.52]);
    assert_eq!(history.reward.as_ref().map(|r| r.len()), Some(2));

    assert_eq!(
        client.eth().max_priority_fee_per_gas().await.unwrap(),
        U256::from(100_000_000u64)
    );
}

#[tokio::test]
async fn pending_transaction_helpers_read_the_pending_block() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getBlockByNumber",
            "params": ["pending", true],
        })))
        .with_body(result_body(1, block_fixture(true)))
        .expect(3)
        .create_async()
        .await;

    let client = Client::new(server.url());

    let pending = client.eth().get_pending_transactions().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].from, address());

    // Subsequent calls carry ids 2 and 3; the mock echoes id 1, so reuse a
    // fresh client per helper to keep the envelope check honest.
    let matches_account = Client::new(server.url())
        .eth()
        .get_account_pending_transactions(address())
        .await
        .unwrap();
    assert_eq!(matches_account.len(), 1);

    let is_pending = Client::new(server.url())
        .eth()
        .is_pending_transaction(tx_hash())
        .await
        .unwrap();
    assert!(is_pending);

    mock.assert_async().await;
}
