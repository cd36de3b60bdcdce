use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::{
    action::{
        CaptureFailure, Stage,
        recording::{RETURN_URL, action, auth_ok, charge_ok, reply, runtime},
    },
    models::SUCCESS_TOKEN_KEY,
};

/// Auth responses that must not yield an access token.
fn failed_auth_payload() -> impl Strategy<Value = Value> {
    prop_oneof![
        (any::<i64>().prop_filter("success status", |status| *status != 1), any::<bool>())
            .prop_map(|(status, with_token)| {
                if with_token {
                    json!({"status": status, "data": {"access_token": "tok"}})
                } else {
                    json!({"status": status})
                }
            }),
        prop_oneof![
            Just(json!({"status": 1})),
            Just(json!({"status": 1, "data": {}})),
            Just(json!({"status": 1, "data": {"access_token": null}})),
            Just(json!({"status": "1", "data": {"access_token": "tok"}})),
        ],
        "[a-z ]{0,24}".prop_map(|message| json!({"status": 1, "data": null, "message": message})),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_failed_auth_never_charges(payload in failed_auth_payload()) {
        let action = action(vec![reply(200, &payload), charge_ok()]);

        let outcome = runtime().block_on(action.initiate_capture(2500, RETURN_URL)).unwrap();

        prop_assert_eq!(action.transport().request_count(), 1);
        prop_assert_eq!(outcome.failure(), Some(CaptureFailure::Rejected(Stage::Auth)));
        prop_assert_eq!(outcome.details(), &payload);
    }

    #[test]
    fn test_amount_is_exact_hundredth(total in -999_999_999_999_999i64..=999_999_999_999_999) {
        let action = action(vec![auth_ok(), charge_ok()]);

        runtime().block_on(action.initiate_capture(total, RETURN_URL)).unwrap();

        let requests = action.transport().requests.lock().unwrap();
        let sent: Decimal = requests[1].json()["amount"]["total"].to_string().parse().unwrap();
        prop_assert_eq!(sent, Decimal::new(total, 2));
    }

    #[test]
    fn test_token_only_in_success_url(
        return_url in "https://[a-z0-9]{1,12}\\.test(/[a-z0-9]{1,8}){0,3}(\\?[a-z]{1,6}=[a-z0-9]{1,6})?",
        total in 1i64..1_000_000,
    ) {
        let action = action(vec![auth_ok(), charge_ok()]);

        let outcome = runtime().block_on(action.initiate_capture(total, &return_url)).unwrap();

        let token = outcome.details()[SUCCESS_TOKEN_KEY].as_str().unwrap().to_owned();
        let requests = action.transport().requests.lock().unwrap();
        let charge = requests[1].json();
        let success_url = charge["return_url"].as_str().unwrap();
        let cancel_url = charge["cancel_url"].as_str().unwrap();

        prop_assert_eq!(cancel_url, return_url.as_str());
        prop_assert!(success_url.starts_with(cancel_url));
        let expected_suffix = format!("success-token={token}");
        prop_assert!(success_url.ends_with(&expected_suffix));
        prop_assert!(!cancel_url.contains(&token));
    }

    #[test]
    fn test_repeated_captures_use_fresh_tokens(total in 1i64..1_000_000) {
        let runtime = runtime();
        let first = action(vec![auth_ok(), charge_ok()]);
        let second = action(vec![auth_ok(), charge_ok()]);

        let a = runtime.block_on(first.initiate_capture(total, RETURN_URL)).unwrap();
        let b = runtime.block_on(second.initiate_capture(total, RETURN_URL)).unwrap();

        prop_assert_ne!(&a.details()[SUCCESS_TOKEN_KEY], &b.details()[SUCCESS_TOKEN_KEY]);
    }
}
