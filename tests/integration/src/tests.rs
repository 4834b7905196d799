//! End-to-end tests for the genesis account generator.
//!
//! Each test writes a genesis file and one or more ledger CSVs into a temp
//! directory, runs the whole pipeline through `generate_accounts::run`, and
//! inspects the JSON that lands on disk.
//!
//! Run:
//! ```bash
//! cargo test -p genesis-accounts-integration-tests
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use bech32::{ToBase32, Variant};
use cosmwasm_std::{coins, Uint128};
use generate_accounts::execute::amount_of;
use generate_accounts::{run, GeneratorError, RunOptions};
use genesis_accounts_common::types::{
    BASE_ACCOUNT_TYPE, CONTINUOUS_VESTING_ACCOUNT_TYPE, DELAYED_VESTING_ACCOUNT_TYPE,
};
use genesis_accounts_common::{AccountError, ChainConfig};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

// ─── Constants ───

/// 2022-01-15T00:00:00Z
const GENESIS_TIME: &str = "2022-01-15T00:00:00Z";
/// 2022-07-15T00:00:00Z, six months after genesis
const SIX_MONTHS: i64 = 1_657_843_200;
/// 2024-07-15T00:00:00Z, thirty months after genesis
const THIRTY_MONTHS: i64 = 1_721_001_600;

const LEDGER_HEADER: &str = "ID Label,Allocation,Notes,Address,Cliff (months),Vesting (months)";

// ─── Helpers ───

fn address(prefix: &str, seed: u8) -> String {
    bech32::encode(prefix, vec![seed; 20].to_base32(), Variant::Bech32).unwrap()
}

fn genesis_doc(genesis_time: &str, accounts: Value, balances: Value, supply: Value) -> Value {
    json!({
        "genesis_time": genesis_time,
        "chain_id": "umee-1",
        "initial_height": "1",
        "consensus_params": { "block": { "max_bytes": "22020096" } },
        "app_state": {
            "auth": {
                "params": { "max_memo_characters": "256" },
                "accounts": accounts
            },
            "bank": {
                "params": { "default_send_enabled": true },
                "balances": balances,
                "supply": supply,
                "denom_metadata": []
            },
            "staking": { "params": { "bond_denom": "uumee" } }
        }
    })
}

fn empty_genesis() -> Value {
    genesis_doc(GENESIS_TIME, json!([]), json!([]), json!([]))
}

fn write_json(path: &Path, value: &Value) -> PathBuf {
    fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path.to_path_buf()
}

fn write_ledger(path: &Path, rows: &[String]) -> PathBuf {
    let mut body = format!("Token allocation,,,,,\n{LEDGER_HEADER}\n");
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    fs::write(path, body).unwrap();
    path.to_path_buf()
}

fn options(genesis_file: &Path, accounts_path: &Path) -> RunOptions {
    RunOptions {
        genesis_file: genesis_file.to_path_buf(),
        accounts_path: accounts_path.to_path_buf(),
        output: None,
        config: ChainConfig::default(),
        reconcile_to: None,
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

fn accounts(doc: &Value) -> &Vec<Value> {
    doc["app_state"]["auth"]["accounts"].as_array().unwrap()
}

fn balances(doc: &Value) -> &Vec<Value> {
    doc["app_state"]["bank"]["balances"].as_array().unwrap()
}

fn find_account<'a>(doc: &'a Value, addr: &str) -> &'a Value {
    accounts(doc)
        .iter()
        .find(|a| {
            a.pointer("/address")
                .or_else(|| a.pointer("/base_vesting_account/base_account/address"))
                .and_then(Value::as_str)
                == Some(addr)
        })
        .unwrap_or_else(|| panic!("account {addr} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_generate_mixed_vesting_accounts() {
    let dir = tempfile::tempdir().unwrap();
    let genesis_file = write_json(&dir.path().join("genesis.json"), &empty_genesis());
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[
            format!("community,\"1,000\",pool,{},-,-", address("umee", 1)),
            format!("investor,250.5,,{},6,-", address("umee", 2)),
            format!("team,1234.567891,,{},6,24", address("umee", 3)),
            format!("advisor,10,,{},,12", address("umee", 4)),
        ],
    );

    let summary = run(&options(&genesis_file, &ledger)).unwrap();
    assert_eq!(summary.accounts, 4);

    let doc = read_json(&genesis_file);

    // 1. Unrelated sections survive untouched
    assert_eq!(doc["chain_id"], "umee-1");
    assert_eq!(doc["app_state"]["staking"]["params"]["bond_denom"], "uumee");
    assert_eq!(doc["app_state"]["auth"]["params"]["max_memo_characters"], "256");
    assert_eq!(doc["app_state"]["bank"]["denom_metadata"], json!([]));

    // 2. Plain account
    let community = find_account(&doc, &address("umee", 1));
    assert_eq!(community["@type"], BASE_ACCOUNT_TYPE);

    // 3. Cliff only => delayed vesting ending six months after genesis
    let investor = find_account(&doc, &address("umee", 2));
    assert_eq!(investor["@type"], DELAYED_VESTING_ACCOUNT_TYPE);
    assert_eq!(
        investor["base_vesting_account"]["end_time"],
        SIX_MONTHS.to_string()
    );
    assert_eq!(
        investor["base_vesting_account"]["original_vesting"],
        json!([{ "denom": "uumee", "amount": "250500000" }])
    );

    // 4. Cliff then linear => continuous vesting starting at the cliff
    let team = find_account(&doc, &address("umee", 3));
    assert_eq!(team["@type"], CONTINUOUS_VESTING_ACCOUNT_TYPE);
    assert_eq!(team["start_time"], SIX_MONTHS.to_string());
    assert_eq!(
        team["base_vesting_account"]["end_time"],
        THIRTY_MONTHS.to_string()
    );

    // 5. Linear only => continuous vesting starting at genesis
    let advisor = find_account(&doc, &address("umee", 4));
    assert_eq!(advisor["@type"], CONTINUOUS_VESTING_ACCOUNT_TYPE);
    assert_eq!(advisor["start_time"], "1642204800");

    // 6. Supply equals the sum of balances
    let supply: Vec<cosmwasm_std::Coin> =
        serde_json::from_value(doc["app_state"]["bank"]["supply"].clone()).unwrap();
    let expected = 1_000_000_000u128 + 250_500_000 + 1_234_567_891 + 10_000_000;
    assert_eq!(supply, coins(expected, "uumee"));
    assert_eq!(summary.supply, supply);

    let balance_total: u128 = balances(&doc)
        .iter()
        .map(|b| b["coins"][0]["amount"].as_str().unwrap().parse::<u128>().unwrap())
        .sum();
    assert_eq!(balance_total, expected);

    // 7. Digest covers the exact bytes written
    assert_eq!(
        summary.sha256,
        hex::encode(Sha256::digest(fs::read(&genesis_file).unwrap()))
    );
}

#[test]
fn test_balances_sorted_by_address_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let genesis_file = write_json(&dir.path().join("genesis.json"), &empty_genesis());
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[
            format!("c,1,,{},-,-", address("umee", 30)),
            format!("a,1,,{},-,-", address("umee", 10)),
            format!("b,1,,{},-,-", address("umee", 20)),
        ],
    );

    run(&options(&genesis_file, &ledger)).unwrap();

    let doc = read_json(&genesis_file);
    let order: Vec<&str> = balances(&doc)
        .iter()
        .map(|b| b["address"].as_str().unwrap())
        .collect();
    assert_eq!(
        order,
        vec![
            address("umee", 10),
            address("umee", 20),
            address("umee", 30)
        ]
    );
}

#[test]
fn test_foreign_prefix_is_reencoded() {
    let dir = tempfile::tempdir().unwrap();
    let genesis_file = write_json(&dir.path().join("genesis.json"), &empty_genesis());
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[format!("hub,42,,{},-,-", address("cosmos", 7))],
    );

    run(&options(&genesis_file, &ledger)).unwrap();

    let doc = read_json(&genesis_file);
    assert_eq!(accounts(&doc)[0]["address"], address("umee", 7));
    assert_eq!(balances(&doc)[0]["address"], address("umee", 7));
}

#[test]
fn test_directory_of_ledgers() {
    let dir = tempfile::tempdir().unwrap();
    let genesis_file = write_json(&dir.path().join("genesis.json"), &empty_genesis());

    let ledgers = dir.path().join("ledgers");
    fs::create_dir_all(ledgers.join("round-2")).unwrap();
    write_ledger(
        &ledgers.join("round-1.csv"),
        &[format!("seed,100,,{},-,-", address("umee", 1))],
    );
    write_ledger(
        &ledgers.join("round-2").join("private.csv"),
        &[
            format!("private-a,200,,{},6,-", address("umee", 2)),
            format!("private-b,300,,{},6,-", address("umee", 3)),
        ],
    );

    let summary = run(&options(&genesis_file, &ledgers)).unwrap();
    assert_eq!(summary.accounts, 3);
    assert_eq!(
        amount_of(&summary.supply, "uumee"),
        Uint128::new(600_000_000)
    );

    let doc = read_json(&genesis_file);
    assert_eq!(accounts(&doc).len(), 3);
    assert_eq!(balances(&doc).len(), 3);
}

#[test]
fn test_existing_state_is_extended() {
    let dir = tempfile::tempdir().unwrap();
    let validator = address("umee", 200);
    let doc = genesis_doc(
        GENESIS_TIME,
        json!([{
            "@type": BASE_ACCOUNT_TYPE,
            "address": validator,
            "pub_key": null,
            "account_number": "0",
            "sequence": "0"
        }]),
        json!([{ "address": validator, "coins": [{ "denom": "uumee", "amount": "5000000" }] }]),
        json!([{ "denom": "uumee", "amount": "5000000" }]),
    );
    let genesis_file = write_json(&dir.path().join("genesis.json"), &doc);
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[format!("seed,1,,{},-,-", address("umee", 1))],
    );

    let summary = run(&options(&genesis_file, &ledger)).unwrap();
    assert_eq!(summary.supply, coins(6_000_000, "uumee"));

    let doc = read_json(&genesis_file);
    assert_eq!(accounts(&doc).len(), 2);
    assert_eq!(balances(&doc).len(), 2);
    find_account(&doc, &validator);
}

#[test]
fn test_duplicate_of_existing_account_leaves_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let doc = genesis_doc(
        GENESIS_TIME,
        json!([{
            "@type": BASE_ACCOUNT_TYPE,
            "address": address("umee", 9),
            "pub_key": null,
            "account_number": "0",
            "sequence": "0"
        }]),
        json!([]),
        json!([]),
    );
    let genesis_file = write_json(&dir.path().join("genesis.json"), &doc);
    let before = fs::read(&genesis_file).unwrap();

    // same key bytes under the foreign prefix
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[
            format!("fresh,1,,{},-,-", address("umee", 1)),
            format!("dup,1,,{},-,-", address("cosmos", 9)),
        ],
    );

    let err = run(&options(&genesis_file, &ledger)).unwrap_err();
    assert!(
        matches!(&err, GeneratorError::DuplicateAccount { address: a } if *a == address("umee", 9)),
        "Expected duplicate error, got: {err:?}"
    );
    assert_eq!(fs::read(&genesis_file).unwrap(), before);
}

#[test]
fn test_duplicate_within_batch() {
    let dir = tempfile::tempdir().unwrap();
    let genesis_file = write_json(&dir.path().join("genesis.json"), &empty_genesis());
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[
            format!("a,1,,{},-,-", address("umee", 5)),
            format!("b,2,,{},-,-", address("umee", 5)),
        ],
    );

    let err = run(&options(&genesis_file, &ledger)).unwrap_err();
    assert!(matches!(err, GeneratorError::DuplicateAccount { .. }));
}

#[test]
fn test_bad_row_aborts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let genesis_file = write_json(&dir.path().join("genesis.json"), &empty_genesis());
    let before = fs::read(&genesis_file).unwrap();

    let cases = [
        (format!("bad-amount,12abc,,{},-,-", address("umee", 1)), "amount"),
        ("bad-address,1,,umee1qqqq,-,-".to_string(), "address"),
        (format!("bad-months,1,,{},six,-", address("umee", 1)), "months"),
        ("short,1,,".to_string(), "columns"),
    ];

    for (row, what) in cases {
        let ledger = write_ledger(
            &dir.path().join("ledger.csv"),
            &[format!("ok,1,,{},-,-", address("umee", 2)), row],
        );
        let err = run(&options(&genesis_file, &ledger)).unwrap_err();
        match what {
            "amount" => assert!(matches!(
                err,
                GeneratorError::Account(AccountError::InvalidAmount { .. })
            )),
            "address" => assert!(matches!(
                err,
                GeneratorError::Account(AccountError::InvalidAddress { .. })
            )),
            "months" => assert!(matches!(err, GeneratorError::InvalidMonths { .. })),
            _ => assert!(matches!(err, GeneratorError::MalformedRow { .. })),
        }
        assert_eq!(fs::read(&genesis_file).unwrap(), before, "{what} row wrote output");
    }
}

#[test]
fn test_linear_vesting_requires_genesis_time() {
    let dir = tempfile::tempdir().unwrap();
    let doc = genesis_doc("0001-01-01T00:00:00Z", json!([]), json!([]), json!([]));
    let genesis_file = write_json(&dir.path().join("genesis.json"), &doc);
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[format!("team,1,,{},6,24", address("umee", 1))],
    );

    let err = run(&options(&genesis_file, &ledger)).unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::Account(AccountError::UnsupportedParameters {
            cliff: 6,
            vesting: 24,
            ..
        })
    ));
}

#[test]
fn test_epoch_genesis_time_is_a_reference() {
    let dir = tempfile::tempdir().unwrap();
    let doc = genesis_doc("1970-01-01T00:00:00Z", json!([]), json!([]), json!([]));
    let genesis_file = write_json(&dir.path().join("genesis.json"), &doc);
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[format!("advisor,1,,{},-,12", address("umee", 1))],
    );

    run(&options(&genesis_file, &ledger)).unwrap();

    let doc = read_json(&genesis_file);
    let advisor = &accounts(&doc)[0];
    assert_eq!(advisor["@type"], CONTINUOUS_VESTING_ACCOUNT_TYPE);
    assert_eq!(advisor["start_time"], "0");
    // 1971-01-01T00:00:00Z
    assert_eq!(advisor["base_vesting_account"]["end_time"], "31536000");
}

#[test]
fn test_month_end_genesis_time_rolls_over() {
    let dir = tempfile::tempdir().unwrap();
    let doc = genesis_doc("2022-01-31T00:00:00Z", json!([]), json!([]), json!([]));
    let genesis_file = write_json(&dir.path().join("genesis.json"), &doc);
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[format!("team,1,,{},1,1", address("umee", 1))],
    );

    run(&options(&genesis_file, &ledger)).unwrap();

    let doc = read_json(&genesis_file);
    let team = &accounts(&doc)[0];
    // 2022-03-03 .. 2022-04-03
    assert_eq!(team["start_time"], "1646265600");
    assert_eq!(team["base_vesting_account"]["end_time"], "1648944000");
}

#[test]
fn test_cliff_without_genesis_time_counts_from_epoch() {
    let dir = tempfile::tempdir().unwrap();
    let doc = genesis_doc("", json!([]), json!([]), json!([]));
    let genesis_file = write_json(&dir.path().join("genesis.json"), &doc);
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[format!("investor,1,,{},3,-", address("umee", 1))],
    );

    run(&options(&genesis_file, &ledger)).unwrap();

    let doc = read_json(&genesis_file);
    // 1970-04-01T00:00:00Z
    assert_eq!(
        accounts(&doc)[0]["base_vesting_account"]["end_time"],
        "7776000"
    );
}

#[test]
fn test_output_path_keeps_input() {
    let dir = tempfile::tempdir().unwrap();
    let genesis_file = write_json(&dir.path().join("genesis.json"), &empty_genesis());
    let before = fs::read(&genesis_file).unwrap();
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[format!("seed,1,,{},-,-", address("umee", 1))],
    );

    let output = dir.path().join("out.json");
    let mut opts = options(&genesis_file, &ledger);
    opts.output = Some(output.clone());

    let summary = run(&opts).unwrap();
    assert_eq!(summary.output, output);
    assert_eq!(fs::read(&genesis_file).unwrap(), before);
    assert_eq!(accounts(&read_json(&output)).len(), 1);
}

#[test]
fn test_reconcile_recovers_truncated_units() {
    let dir = tempfile::tempdir().unwrap();
    let genesis_file = write_json(&dir.path().join("genesis.json"), &empty_genesis());
    let treasury = address("umee", 1);
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[
            format!("treasury,100,,{},6,24", treasury),
            format!("a,3.0000005,,{},-,-", address("umee", 2)),
            format!("b,1.0000009,,{},-,-", address("umee", 3)),
            format!("c,2.0000006,,{},-,-", address("umee", 4)),
        ],
    );

    let mut opts = options(&genesis_file, &ledger);
    opts.reconcile_to = Some(address("cosmos", 1));

    let summary = run(&opts).unwrap();
    // 0.5 + 0.9 + 0.6 = 2.0 base units
    assert_eq!(summary.top_up, Some(Uint128::new(2)));
    assert_eq!(summary.supply, coins(106_000_002, "uumee"));

    let doc = read_json(&genesis_file);
    let account = find_account(&doc, &treasury);
    assert_eq!(
        account["base_vesting_account"]["original_vesting"],
        json!([{ "denom": "uumee", "amount": "100000002" }])
    );
    let balance = balances(&doc)
        .iter()
        .find(|b| b["address"] == treasury.as_str())
        .unwrap();
    assert_eq!(balance["coins"], json!([{ "denom": "uumee", "amount": "100000002" }]));
}

#[test]
fn test_reconcile_target_must_be_generated() {
    let dir = tempfile::tempdir().unwrap();
    let genesis_file = write_json(&dir.path().join("genesis.json"), &empty_genesis());
    let before = fs::read(&genesis_file).unwrap();
    let ledger = write_ledger(
        &dir.path().join("ledger.csv"),
        &[format!("seed,1.5,,{},-,-", address("umee", 1))],
    );

    let mut opts = options(&genesis_file, &ledger);
    opts.reconcile_to = Some(address("umee", 99));

    let err = run(&opts).unwrap_err();
    assert!(matches!(err, GeneratorError::ReconcileAccountNotFound { .. }));
    assert_eq!(fs::read(&genesis_file).unwrap(), before);
}
