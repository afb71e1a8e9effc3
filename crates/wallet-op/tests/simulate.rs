//! Tests for submitting fragments to the simulator and decoding its answers

use alloy_primitives::{address, bytes, keccak256, Address, Bytes, B256, U256};
use serde_json::json;
use wallet_op::{
    builtins::builtin_abis, encode_exec_call, test_utils::*, DynSolValue, LogEntry,
    SimulateError, SimulationClient, SimulationParams, SimulatorAuth, SimulatorConfig,
    TransportError,
};
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const ENTRY_POINT: Address = address!("82b035B4405Dd60b449b054894004FeE80566655");
const OWNER: Address = address!("4D5175EA204954a2CA9Ca06fe766764b196CEDa5");
const WALLET: Address = address!("1000000000000000000000000000000000000001");
const SIMULATE_PATH: &str = "/api/v1/account/alice/project/wallets/simulate";

fn client(server: &MockServer) -> SimulationClient {
    let config = SimulatorConfig::new(SimulatorAuth::new("alice", "wallets", "secret"))
        .with_base_url(server.uri());
    SimulationClient::new(config)
}

fn params() -> SimulationParams {
    let mut abis = builtin_abis().unwrap();
    abis.push(foo_descriptor());
    SimulationParams::new(5, ENTRY_POINT, OWNER, bytes!("6080604052"), 500_000)
        .with_value(U256::from(1))
        .with_abis(abis)
}

async fn mock_simulator(body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SIMULATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_simulate_decodes_logs_and_balance_diffs() {
    let server = MockServer::start().await;
    let input = encode_exec_call(bytes!("6080604052"), U256::ZERO);
    Mock::given(method("POST"))
        .and(path(SIMULATE_PATH))
        .and(header("X-Access-Key", "secret"))
        .and(body_partial_json(json!({
            "save": false,
            "save_if_fails": false,
            "simulation_type": "quick",
            "network_id": "5",
            "input": input,
            "value": "1",
            "gas": 500_000,
            "gas_price": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_response(
            vec![foo_log_json(WALLET, 1), foo_log_json(WALLET, 2)],
            vec![
                balance_diff_json(OWNER, U256::from(0x1234), U256::from(0x1233)),
                balance_diff_json(WALLET, U256::ZERO, U256::from(1)),
            ],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client(&server).simulate(&params()).await.unwrap();

    assert_eq!(outcome.logs.len(), 2);
    for (entry, expected) in outcome.logs.iter().zip([1u64, 2]) {
        assert!(entry.is_decoded());
        assert_eq!(entry.name(), Some("Foo"));
        assert_eq!(entry.address(), WALLET);
        let log = entry.as_decoded().unwrap();
        let value = DynSolValue::Uint(U256::from(expected), 256);
        assert_eq!(log.args.get("x"), Some(&value));
        assert_eq!(log.args.get("0"), Some(&value));
    }

    assert_eq!(outcome.balance_diffs.len(), 2);
    assert_eq!(outcome.balance_diffs[0].address, OWNER);
    assert_eq!(outcome.balance_diffs[0].start, U256::from(0x1234));
    assert_eq!(outcome.balance_diffs[0].end, U256::from(0x1233));
    assert!(outcome.balance_diffs[0].is_decrease());
    assert_eq!(outcome.balance_diffs[1].address, WALLET);
    assert!(outcome.balance_diffs[1].is_increase());
}

#[tokio::test]
async fn test_untagged_log_passes_data_through() {
    let data = bytes!("deadbeef");
    let log = log_json(WALLET, None, &data);
    let server = mock_simulator(success_response(vec![log], vec![])).await;

    for abis in [vec![], builtin_abis().unwrap()] {
        let params = SimulationParams::new(5, ENTRY_POINT, OWNER, Bytes::new(), 100_000)
            .with_abis(abis);
        let outcome = client(&server).simulate(&params).await.unwrap();
        match &outcome.logs[..] {
            [LogEntry::Opaque(log)] => {
                assert_eq!(log.name, None);
                assert_eq!(log.args.get("0"), Some(&DynSolValue::Bytes(data.to_vec())));
            }
            other => panic!("unexpected logs: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_unknown_event_is_kept_undecoded() {
    let topic = keccak256("Unknown(uint256)");
    let log = log_json(WALLET, Some(&[topic][..]), &Bytes::new());
    let server = mock_simulator(success_response(vec![log], vec![])).await;

    let outcome = client(&server).simulate(&params()).await.unwrap();
    assert_eq!(outcome.decoded().count(), 0);
    let undecoded: Vec<_> = outcome.undecoded().collect();
    assert_eq!(undecoded.len(), 1);
    assert_eq!(undecoded[0].topics.as_deref(), Some(&[topic][..]));
}

#[tokio::test]
async fn test_missing_lists_are_empty() {
    let server = mock_simulator(json!({
        "transaction": { "transaction_info": {} }
    }))
    .await;

    let outcome = client(&server).simulate(&params()).await.unwrap();
    assert!(outcome.logs.is_empty());
    assert!(outcome.balance_diffs.is_empty());
}

#[tokio::test]
async fn test_error_message_is_revert() {
    let server = mock_simulator(revert_response("execution reverted")).await;

    let err = client(&server).simulate(&params()).await.unwrap_err();
    assert!(err.is_revert());
    assert_eq!(err.revert_reason(), Some("execution reverted"));
    assert_eq!(err.to_string(), "Simulated transaction reverted: execution reverted");
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("invalid access key"))
        .mount(&server)
        .await;

    let err = client(&server).simulate(&params()).await.unwrap_err();
    assert!(err.is_transport());
    match err {
        SimulateError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(body, "invalid access key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server).simulate(&params()).await.unwrap_err();
    assert!(matches!(err, SimulateError::Transport(TransportError::Decode(_))));
}

#[tokio::test]
async fn test_missing_transaction_info_is_transport_error() {
    let server = mock_simulator(json!({ "transaction": { "error_message": null } })).await;

    let err = client(&server).simulate(&params()).await.unwrap_err();
    assert!(matches!(err, SimulateError::Transport(TransportError::Decode(_))));
}

#[tokio::test]
async fn test_invalid_balance_is_transport_error() {
    let server = mock_simulator(success_response(
        vec![],
        vec![json!({ "address": WALLET, "original": "0x1", "dirty": "lots" })],
    ))
    .await;

    let err = client(&server).simulate(&params()).await.unwrap_err();
    assert!(matches!(
        err,
        SimulateError::Transport(TransportError::InvalidBalance(v)) if v == "lots"
    ));
}

#[tokio::test]
async fn test_unreachable_simulator_is_transport_error() {
    let config = SimulatorConfig::new(SimulatorAuth::new("alice", "wallets", "secret"))
        .with_base_url("http://127.0.0.1:1");
    let err = SimulationClient::new(config).simulate(&params()).await.unwrap_err();
    assert!(matches!(err, SimulateError::Transport(TransportError::Http(_))));
}

#[tokio::test]
async fn test_builtin_transfer_events_are_told_apart() {
    let token = address!("2000000000000000000000000000000000000002");
    let topics = |id: Option<u64>| {
        let mut topics = vec![
            keccak256("Transfer(address,address,uint256)"),
            OWNER.into_word(),
            WALLET.into_word(),
        ];
        topics.extend(id.map(|id| B256::from(U256::from(id).to_be_bytes::<32>())));
        topics
    };
    let amount = Bytes::copy_from_slice(&U256::from(10).to_be_bytes::<32>());
    let server = mock_simulator(success_response(
        vec![
            log_json(token, Some(topics(None).as_slice()), &amount),
            log_json(token, Some(topics(Some(7)).as_slice()), &Bytes::new()),
        ],
        vec![],
    ))
    .await;

    let outcome = client(&server).simulate(&params()).await.unwrap();
    let logs: Vec<_> = outcome.decoded().collect();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].args.get("wad"), Some(&DynSolValue::Uint(U256::from(10), 256)));
    assert_eq!(logs[1].args.get("tokenId"), Some(&DynSolValue::Uint(U256::from(7), 256)));
    assert_eq!(logs[1].args.get("from"), Some(&DynSolValue::Address(OWNER)));
}
