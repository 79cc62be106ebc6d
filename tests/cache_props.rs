//! Randomized LRU properties checked against a reference model

use proptest::prelude::*;

use mnemosyne::RecencyCache;

proptest! {
    #[test]
    fn tracks_a_reference_model_and_never_exceeds_capacity(
        capacity in 1usize..8,
        ops in proptest::collection::vec((0u8..16, any::<u16>(), any::<bool>()), 1..200),
    ) {
        let mut cache = RecencyCache::new(capacity).unwrap();
        // Reference model: a vector ordered most- to least-recently-used.
        let mut model: Vec<(u8, u16)> = Vec::new();

        for (key, value, is_put) in ops {
            if is_put {
                cache.put(key, value);
                if let Some(pos) = model.iter().position(|(k, _)| *k == key) {
                    model.remove(pos);
                }
                model.insert(0, (key, value));
                model.truncate(capacity);
            } else {
                match model.iter().position(|(k, _)| *k == key) {
                    Some(pos) => {
                        let entry = model.remove(pos);
                        model.insert(0, entry);
                        prop_assert_eq!(cache.get(&key), Some(&model[0].1));
                    }
                    None => prop_assert_eq!(cache.get(&key), None),
                }
            }

            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.len(), model.len());

            let cache_keys: Vec<u8> = cache.keys().copied().collect();
            let model_keys: Vec<u8> = model.iter().map(|(k, _)| *k).collect();
            prop_assert_eq!(cache_keys, model_keys);
        }
    }
}
