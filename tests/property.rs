use chrono::{TimeZone, Utc};
use cosmos_ledger_signer::fees::normalize;
use cosmos_ledger_signer::messages::ibc::{
    revision_height, revision_number_from_chain_id, timeout_timestamp_nanos,
};
use cosmos_ledger_signer::messages::{ProtocolMessage, Registry};
use cosmos_ledger_signer::signing::{canonical_json_bytes, CompressedPublicKey, LegacySignDoc, SigningInput};
use cosmos_ledger_signer::utils::sanitize::sanitize_memo;
use cosmos_sdk_proto::cosmos::bank::v1beta1::MsgSend;
use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;
use cosmos_sdk_proto::cosmos::tx::v1beta1::{AuthInfo, TxBody};
use proptest::prelude::*;
use prost::Message;
use std::time::Duration;

fn send(amount: u64) -> ProtocolMessage {
    ProtocolMessage::Send(MsgSend {
        from_address: "cosmos1sender".into(),
        to_address: "cosmos1recipient".into(),
        amount: vec![Coin {
            denom: "uatom".into(),
            amount: amount.to_string(),
        }],
    })
}

proptest! {
    #[test]
    fn sanitized_memos_are_stable(memo in ".{0,64}") {
        let once = sanitize_memo(&memo).value;
        prop_assert!(!once.contains('&'));
        prop_assert!(!once.contains('<'));
        prop_assert!(!once.contains('>'));
        prop_assert_eq!(once.chars().count(), memo.chars().count());

        let twice = sanitize_memo(&once);
        prop_assert!(!twice.was_modified);
        prop_assert_eq!(twice.value, once);
    }

    #[test]
    fn legacy_sign_doc_agrees_with_wire_bytes(
        account_number in any::<u64>(),
        sequence in any::<u64>(),
        fee_amount in 1u64..10_000_000,
        gas_limit in 1u64..5_000_000,
        amount in 1u64..u64::MAX,
        memo in ".{0,48}",
    ) {
        let normalized = normalize(&memo, &fee_amount.to_string(), gas_limit, "uatom", 1024).unwrap();
        let registry = Registry::wallet_default();
        let key = CompressedPublicKey::from_slice(&[0x03; 33]).unwrap();
        let messages = vec![send(amount)];
        let input = SigningInput {
            registry: &registry,
            messages: &messages,
            fee: &normalized.fee,
            memo: &normalized.memo,
            public_key: &key,
            account_number,
            account_sequence: sequence,
            chain_id: "cosmoshub-4",
        };

        let doc = LegacySignDoc::assemble(&input).unwrap();
        let body = TxBody::decode(doc.body_bytes.as_slice()).unwrap();
        let auth = AuthInfo::decode(doc.auth_info_bytes.as_slice()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&doc.sign_bytes).unwrap();

        prop_assert_eq!(json["memo"].as_str().unwrap(), body.memo.as_str());
        prop_assert_eq!(json["sequence"].as_str().unwrap(), auth.signer_infos[0].sequence.to_string());
        prop_assert_eq!(json["account_number"].as_str().unwrap(), account_number.to_string());

        let fee = auth.fee.unwrap();
        prop_assert_eq!(json["fee"]["gas"].as_str().unwrap(), fee.gas_limit.to_string());
        prop_assert_eq!(json["fee"]["amount"][0]["amount"].as_str().unwrap(), fee.amount[0].amount.as_str());
        prop_assert_eq!(json["fee"]["amount"][0]["denom"].as_str().unwrap(), fee.amount[0].denom.as_str());

        let wire = MsgSend::decode(body.messages[0].value.as_slice()).unwrap();
        prop_assert_eq!(
            json["msgs"][0]["value"]["amount"][0]["amount"].as_str().unwrap(),
            wire.amount[0].amount.as_str()
        );
    }

    #[test]
    fn canonical_json_round_trips_and_hides_html(text in ".{0,64}", n in any::<u64>()) {
        let value = serde_json::json!({ "z": text, "a": n.to_string(), "m": [text.clone()] });
        let bytes = canonical_json_bytes(&value);

        prop_assert!(!bytes.iter().any(|b| matches!(b, b'&' | b'<' | b'>')));

        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        prop_assert_eq!(parsed, value);
    }

    #[test]
    fn timeout_timestamp_is_window_past_now(
        now_ms in 0i64..4_000_000_000_000,
        window_ms in 1u64..86_400_000,
    ) {
        let now = Utc.timestamp_millis_opt(now_ms).unwrap();
        let nanos = timeout_timestamp_nanos(now, Duration::from_millis(window_ms)).unwrap();
        prop_assert!(nanos > now_ms as u64 * 1_000_000);
        prop_assert_eq!(nanos, (now_ms as u64 + window_ms) * 1_000_000);
    }

    #[test]
    fn revision_number_is_chain_id_suffix(prefix in "[a-z]{1,12}(-[a-z]{1,8})?", revision in any::<u32>()) {
        let chain_id = format!("{}-{}", prefix, revision);
        prop_assert_eq!(revision_number_from_chain_id(&chain_id, 122), revision as u64);
        prop_assert_eq!(revision_number_from_chain_id(&prefix, 122), 122);
    }

    #[test]
    fn revision_height_adds_margin(latest in 1u64..u64::MAX / 2, margin in 0u64..10_000) {
        prop_assert_eq!(revision_height(Some(latest), margin, 7), latest + margin);
        prop_assert_eq!(revision_height(None, margin, 7), 7);
        prop_assert_eq!(revision_height(Some(0), margin, 7), 7);
    }
}
