//! Integration tests for [`ledger_client::AptosLedgerClient`] against a mockito fullnode.
//!
//! Each test registers only the endpoints the stage under test should call.

use std::time::Duration;

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use ledger_client::{
    AptosClientOptions, AptosLedgerClient, LedgerClient, LedgerError, LocalAccount, Network,
    TRANSFER_FUNCTION,
};
use mockito::{Matcher, Server, ServerGuard};

const KEY_HEX: &str = "0x0707070707070707070707070707070707070707070707070707070707070707";
const RECIPIENT: &str = "0xa11ce";

fn account() -> LocalAccount {
    LocalAccount::from_private_key_hex(KEY_HEX).unwrap()
}

fn client(server: &ServerGuard) -> AptosLedgerClient {
    let options = AptosClientOptions {
        confirmation_timeout: Duration::from_millis(300),
        poll_interval: Duration::from_millis(50),
        ..AptosClientOptions::default()
    };
    AptosLedgerClient::new(format!("{}/v1", server.url()), account(), options)
}

async fn mock_account_and_gas(server: &mut ServerGuard) -> (mockito::Mock, mockito::Mock) {
    let account_path = format!("/v1/accounts/{}", account().address());
    let account_mock = server
        .mock("GET", account_path.as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"sequence_number":"12","authentication_key":"0x00"}"#)
        .create_async()
        .await;
    let gas_mock = server
        .mock("GET", "/v1/estimate_gas_price")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"gas_estimate":100,"prioritized_gas_estimate":150}"#)
        .create_async()
        .await;
    (account_mock, gas_mock)
}

/// **Test: build_transfer reads the sender's sequence number and gas price into the transaction.**
#[tokio::test]
async fn test_build_transfer_uses_account_state() {
    let mut server = Server::new_async().await;
    let (account_mock, gas_mock) = mock_account_and_gas(&mut server).await;
    let client = client(&server);

    let txn = client.build_transfer(RECIPIENT, 10_000_000).await.unwrap();

    account_mock.assert_async().await;
    gas_mock.assert_async().await;
    assert_eq!(txn.sender, account().address());
    assert_eq!(txn.sequence_number, 12);
    assert_eq!(txn.gas_unit_price, 100);
    assert_eq!(txn.payload.function, TRANSFER_FUNCTION);
    assert_eq!(
        txn.payload.arguments[0],
        "0x00000000000000000000000000000000000000000000000000000000000a11ce"
    );
    assert_eq!(txn.payload.arguments[1], "10000000");
}

/// **Test: an unparseable recipient fails before any request is made.**
#[tokio::test]
async fn test_build_transfer_invalid_address_makes_no_requests() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let client = client(&server);

    let err = client.build_transfer("not-an-address", 1).await.unwrap_err();

    assert!(matches!(err, LedgerError::InvalidAddress(_)));
    any.assert_async().await;
}

/// **Test: simulate posts a zeroed signature and surfaces the VM status.**
#[tokio::test]
async fn test_simulate_reports_vm_status() {
    let mut server = Server::new_async().await;
    let (_a, _g) = mock_account_and_gas(&mut server).await;
    let zero_sig = format!("0x{}", "00".repeat(64));
    let simulate = server
        .mock("POST", "/v1/transactions/simulate")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "sequence_number": "12",
            "signature": { "type": "ed25519_signature", "signature": zero_sig }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"success":false,"vm_status":"Move abort in 0x1::coin: EINSUFFICIENT_BALANCE(0x10006)","gas_used":"9","hash":"0x1"}]"#,
        )
        .create_async()
        .await;
    let client = client(&server);

    let txn = client.build_transfer(RECIPIENT, 1).await.unwrap();
    let outcome = client.simulate(&txn).await.unwrap();

    simulate.assert_async().await;
    assert!(!outcome.success);
    assert!(outcome.vm_status.contains("EINSUFFICIENT_BALANCE"));
    assert_eq!(outcome.gas_used, 9);
}

/// **Test: sign signs the node-encoded signing message with the faucet key.**
#[tokio::test]
async fn test_sign_uses_encoded_submission() {
    let mut server = Server::new_async().await;
    let (_a, _g) = mock_account_and_gas(&mut server).await;
    let encode = server
        .mock("POST", "/v1/transactions/encode_submission")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#""0xb5e97db07fa0bd0e5598aa3643a9bc6f6693bddc1a9fec9e674a461eaa00b193""#)
        .create_async()
        .await;
    let client = client(&server);

    let txn = client.build_transfer(RECIPIENT, 1).await.unwrap();
    let signed = client.sign(&txn).await.unwrap();

    encode.assert_async().await;
    let message =
        hex::decode("b5e97db07fa0bd0e5598aa3643a9bc6f6693bddc1a9fec9e674a461eaa00b193").unwrap();
    let sig_bytes: [u8; 64] = hex::decode(signed.signature.signature.trim_start_matches("0x"))
        .unwrap()
        .try_into()
        .unwrap();
    let vk = VerifyingKey::from_bytes(&account().public_key()).unwrap();
    assert!(vk.verify(&message, &Signature::from_bytes(&sig_bytes)).is_ok());
    assert_eq!(signed.transaction, txn);
}

/// **Test: a rejected submission maps the fullnode error body to LedgerError::Api.**
#[tokio::test]
async fn test_submit_rejected_maps_api_error() {
    let mut server = Server::new_async().await;
    let (_a, _g) = mock_account_and_gas(&mut server).await;
    let _encode = server
        .mock("POST", "/v1/transactions/encode_submission")
        .with_status(200)
        .with_body(r#""0x01""#)
        .create_async()
        .await;
    let _submit = server
        .mock("POST", "/v1/transactions")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Invalid transaction: SEQUENCE_NUMBER_TOO_OLD","error_code":"vm_error","vm_error_code":3}"#)
        .create_async()
        .await;
    let client = client(&server);

    let txn = client.build_transfer(RECIPIENT, 1).await.unwrap();
    let signed = client.sign(&txn).await.unwrap();
    let err = client.submit(&signed).await.unwrap_err();

    match err {
        LedgerError::Api {
            status,
            message,
            error_code,
        } => {
            assert_eq!(status, 400);
            assert!(message.contains("SEQUENCE_NUMBER_TOO_OLD"));
            assert_eq!(error_code.as_deref(), Some("vm_error"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

/// **Test: submit returns the pending hash; wait returns the committed transaction.**
#[tokio::test]
async fn test_submit_and_wait_committed() {
    let mut server = Server::new_async().await;
    let hash = "0x5d1f7a0e3b3f4c1b8b1e1a7d0e4a9b0c2f6d8e1a3c5b7d9f0a2c4e6b8d0f1a3c";
    let _submit = server
        .mock("POST", "/v1/transactions")
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"hash":"{hash}","sender":"0x1","sequence_number":"12"}}"#))
        .create_async()
        .await;
    let by_hash = format!("/v1/transactions/by_hash/{hash}");
    let _status = server
        .mock("GET", by_hash.as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"type":"user_transaction","hash":"{hash}","version":"4242","success":true,"vm_status":"Executed successfully"}}"#
        ))
        .create_async()
        .await;
    let client = client(&server);

    let signed = ledger_client::SignedTransaction {
        transaction: ledger_client::UnsignedTransaction {
            sender: account().address(),
            sequence_number: 12,
            max_gas_amount: 20_000,
            gas_unit_price: 100,
            expiration_timestamp_secs: 1_900_000_000,
            payload: ledger_client::EntryFunctionPayload::transfer_coins(
                &RECIPIENT.parse().unwrap(),
                1,
            ),
        },
        signature: ledger_client::Ed25519Signature::new(&account().public_key(), &[1u8; 64]),
    };
    let pending = client.submit(&signed).await.unwrap();
    assert_eq!(pending.hash, hash);

    let committed = client.wait_for_transaction(&pending.hash).await.unwrap();
    assert!(committed.success);
    assert_eq!(committed.version, 4242);
    assert_eq!(committed.vm_status, "Executed successfully");
}

/// **Test: a transaction that stays pending past the wait limit yields LedgerError::Timeout.**
#[tokio::test]
async fn test_wait_times_out_while_pending() {
    let mut server = Server::new_async().await;
    let _status = server
        .mock("GET", "/v1/transactions/by_hash/0xfeed")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"type":"pending_transaction","hash":"0xfeed"}"#)
        .expect_at_least(2)
        .create_async()
        .await;
    let client = client(&server);

    let err = client.wait_for_transaction("0xfeed").await.unwrap_err();

    assert!(matches!(err, LedgerError::Timeout { ref hash, .. } if hash == "0xfeed"));
}

/// **Test: a hash the node has not indexed yet (404) is treated as pending, not as an error.**
#[tokio::test]
async fn test_wait_treats_not_found_as_pending() {
    let mut server = Server::new_async().await;
    let _status = server
        .mock("GET", "/v1/transactions/by_hash/0xbeef")
        .with_status(404)
        .with_body(r#"{"message":"Transaction not found by Transaction hash(0xbeef)","error_code":"transaction_not_found"}"#)
        .create_async()
        .await;
    let client = client(&server);

    let err = client.wait_for_transaction("0xbeef").await.unwrap_err();

    assert!(matches!(err, LedgerError::Timeout { .. }));
}

#[test]
fn test_network_urls() {
    assert_eq!(
        Network::Testnet.node_url(),
        "https://fullnode.testnet.aptoslabs.com/v1"
    );
    assert_eq!(
        Network::Testnet.explorer_url("0xab"),
        "https://explorer.aptoslabs.com/txn/0xab?network=testnet"
    );
    assert_eq!("Devnet".parse::<Network>().unwrap(), Network::Devnet);
    assert!("moonnet".parse::<Network>().is_err());
}
