use proptest::prelude::*;
use voxland_blocks::BlockType;

fn any_block() -> impl Strategy<Value = BlockType> {
    (0usize..BlockType::ALL.len()).prop_map(|i| BlockType::ALL[i])
}

proptest! {
    // Block names parse back regardless of ASCII case.
    #[test]
    fn parse_ignores_case(b in any_block(), mask in proptest::collection::vec(any::<bool>(), 8)) {
        let mixed: String = b
            .name()
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert_eq!(mixed.parse::<BlockType>(), Ok(b));
    }

    // Only the four terrain layers carry a biome tier, and tiers are ordered like the enum.
    #[test]
    fn tier_order_matches_enum_order(a in any_block(), b in any_block()) {
        if let (Some(ta), Some(tb)) = (a.biome_tier(), b.biome_tier()) {
            prop_assert_eq!(ta.cmp(&tb), a.cmp(&b));
        }
    }
}
