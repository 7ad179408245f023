use proptest::prelude::*;
use tinygit_hash::hex::{decode_into, is_hex_prefix, to_hex};
use tinygit_hash::ObjectId;

proptest! {
    #[test]
    fn hex_encode_decode_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let hex = to_hex(&bytes);
        prop_assert_eq!(hex.len(), bytes.len() * 2);
        let mut decoded = vec![0u8; bytes.len()];
        decode_into(&hex, &mut decoded).unwrap();
        prop_assert_eq!(&decoded, &bytes);
    }

    #[test]
    fn oid_hex_roundtrip(bytes in any::<[u8; 20]>()) {
        let oid = ObjectId::new(bytes);
        let hex = oid.to_hex();
        prop_assert!(is_hex_prefix(&hex));
        let parsed: ObjectId = hex.parse().unwrap();
        prop_assert_eq!(oid, parsed);
    }

    #[test]
    fn every_prefix_of_an_id_matches_it(bytes in any::<[u8; 20]>(), len in 1usize..=40) {
        let oid = ObjectId::new(bytes);
        let hex = oid.to_hex();
        prop_assert!(oid.starts_with_hex(&hex[..len]));
    }
}
