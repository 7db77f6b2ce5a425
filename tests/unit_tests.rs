use lora_node::{
    config::{
        fleet::{check_fleet, FleetError},
        radio::{CODING_RATES_4, SPREADING_FACTORS},
        NodeId, NodeIdError, RadioConfig, Region, NODE, PUBLIC_SYNC_WORD,
    },
    device::validate,
    radio::{ConfigError, PaOutput, Sx127xVariant},
};

const N01: RadioConfig = RadioConfig {
    band: 433_000_000,
    tx_power: 17,
    spreading_factor: 7,
    signal_bandwidth: 125_000,
    coding_rate_4: 5,
    sync_word: 0x12,
    node_id: NodeId::new("N01"),
};

// Evaluated at compile time
const NODE_BAND: u32 = NODE.band;
const NODE_SYNC: u8 = NODE.sync_word;

#[test]
fn test_compiled_node_config() {
    assert_eq!(NODE_BAND, 433_000_000);
    assert_eq!(NODE.tx_power, 17);
    assert_eq!(NODE.spreading_factor, 7);
    assert_eq!(NODE.signal_bandwidth, 125_000);
    assert_eq!(NODE.coding_rate_4, 5);
    assert_eq!(NODE_SYNC, 0x12);

    let expected_id = option_env!("LORA_NODE_ID").unwrap_or("N01");
    assert_eq!(NODE.node_id.as_str(), expected_id);
    assert!(!NODE.node_id.is_empty());
}

#[test]
fn test_domains() {
    assert!(SPREADING_FACTORS.contains(&7));
    assert!(!SPREADING_FACTORS.contains(&13));
    assert!(CODING_RATES_4.contains(&5));
    assert!(!CODING_RATES_4.contains(&9));
}

#[test]
fn test_sync_word() {
    assert_ne!(N01.sync_word, PUBLIC_SYNC_WORD);
    assert!(!N01.uses_public_sync_word());
    assert!(RadioConfig { sync_word: 0x34, ..N01 }.uses_public_sync_word());
}

#[test]
fn test_modulation_view() {
    let m = N01.modulation();
    assert_eq!(m.spreading_factor, 7);
    assert_eq!(m.bandwidth, 125_000);
    assert_eq!(m.coding_rate, 5);
}

#[test]
fn test_validate_reference_on_each_variant() {
    for variant in [
        Sx127xVariant::Sx1276,
        Sx127xVariant::Sx1277,
        Sx127xVariant::Sx1278,
        Sx127xVariant::Sx1279,
    ] {
        assert_eq!(validate(&N01, &variant.capabilities(PaOutput::Boost)), Ok(()));
    }
}

#[test]
fn test_validate_low_band_bandwidth() {
    let caps = Sx127xVariant::Sx1276.capabilities(PaOutput::Boost);
    let config = RadioConfig {
        band: 169_400_000,
        signal_bandwidth: 500_000,
        ..N01
    };
    assert_eq!(
        validate(&config, &caps),
        Err(ConfigError::BandwidthInBand {
            bandwidth: 500_000,
            band: 169_400_000
        })
    );
}

#[test]
fn test_validate_node_id() {
    let caps = Sx127xVariant::Sx1276.capabilities(PaOutput::Boost);
    let config = RadioConfig {
        node_id: NodeId::new("gateway-node-0001"),
        ..N01
    };
    assert_eq!(
        validate(&config, &caps),
        Err(ConfigError::NodeId(NodeIdError::TooLong(17)))
    );
}

#[test]
fn test_region_plans() {
    assert!(Region::US915.check(&RadioConfig { band: 915_000_000, ..N01 }).is_ok());
    assert!(Region::CN470.check(&RadioConfig { band: 915_000_000, ..N01 }).is_err());
    assert!(Region::EU433.check(&RadioConfig { band: 433_175_000, tx_power: 10, ..N01 }).is_ok());
}

#[test]
fn test_fleet_unique_ids() {
    let fleet = [
        N01,
        RadioConfig { node_id: NodeId::new("N02"), ..N01 },
        RadioConfig { node_id: NodeId::new("N03"), ..N01 },
    ];
    assert_eq!(check_fleet(&fleet), Ok(()));
}

#[test]
fn test_fleet_duplicate_ids() {
    let fleet = [
        N01,
        RadioConfig { node_id: NodeId::new("N02"), ..N01 },
        N01,
    ];
    assert_eq!(
        check_fleet(&fleet),
        Err(FleetError::DuplicateNodeId { first: 0, second: 2 })
    );
}

#[test]
fn test_fleet_separate_networks_may_share_ids() {
    let fleet = [N01, RadioConfig { sync_word: 0x2B, ..N01 }];
    assert_eq!(check_fleet(&fleet), Ok(()));

    let fleet = [N01, RadioConfig { band: 434_000_000, ..N01 }];
    assert_eq!(check_fleet(&fleet), Ok(()));
}

#[test]
fn test_fleet_invalid_id() {
    let fleet = [N01, RadioConfig { node_id: NodeId::new(""), ..N01 }];
    assert_eq!(
        check_fleet(&fleet),
        Err(FleetError::InvalidNodeId {
            index: 1,
            error: NodeIdError::Empty
        })
    );
}
