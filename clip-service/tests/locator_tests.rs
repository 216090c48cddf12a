//! Share links for ids and keys drawn from the real alphabets.

use clip_crypto::{DEFAULT_ID_LENGTH, DEFAULT_KEY_LENGTH, generate_id, generate_key};
use clip_service::Locator;
use proptest::prelude::*;

#[test]
fn generated_locators_survive_every_encoding() {
    for _ in 0..200 {
        let locator = Locator::new(
            generate_id(DEFAULT_ID_LENGTH).unwrap(),
            generate_key(DEFAULT_KEY_LENGTH).unwrap(),
        );
        assert_eq!(Locator::decode(&locator.to_fragment()), Some(locator.clone()));
        assert_eq!(Locator::decode(&locator.to_legacy_fragment()), Some(locator.clone()));
        let url = locator.to_url("https://clip.example");
        assert_eq!(Locator::from_url(&url), Some(locator));
    }
}

proptest! {
    #[test]
    fn fragment_decodes_back(
        id in "[A-Za-z0-9]{1,16}",
        key in "[A-Za-z0-9_-]{1,43}",
    ) {
        let locator = Locator::new(id, key);
        prop_assert_eq!(Locator::decode(&locator.to_fragment()), Some(locator.clone()));
        prop_assert_eq!(Locator::decode(&locator.to_legacy_fragment()), Some(locator));
    }

    #[test]
    fn decode_never_panics(fragment in "\\PC*") {
        let _ = Locator::decode(&fragment);
        let _ = Locator::from_url(&fragment);
    }
}
