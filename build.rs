use std::{env, error::Error, fs, path::Path};

use serde::Deserialize;

#[derive(Deserialize)]
struct RawConfig {
    band: u32,
    tx_power: i8,
    spreading_factor: u8,
    signal_bandwidth: u32,
    coding_rate_4: u8,
    sync_word: u8,
    node_id: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-env-changed=LORA_NODE_CONFIG");
    println!("cargo:rerun-if-env-changed=LORA_NODE_ID");

    let path = env::var("LORA_NODE_CONFIG").unwrap_or_else(|_| "node.toml".to_string());
    println!("cargo:rerun-if-changed={}", path);

    // Read and parse
    let toml_str = fs::read_to_string(&path)?;
    let mut raw: RawConfig = toml::from_str(&toml_str)?;

    // Per-board identity wins over the file
    if let Ok(node_id) = env::var("LORA_NODE_ID") {
        raw.node_id = node_id;
    }

    // Generate Rust code
    let code = format!(
        r#"
        /// Configuration compiled into this image
        pub const NODE: RadioConfig = RadioConfig {{
            band: {band},
            tx_power: {power},
            spreading_factor: {sf},
            signal_bandwidth: {bw},
            coding_rate_4: {cr},
            sync_word: {sync:#04x},
            node_id: NodeId::new({id:?}),
        }};
    "#,
        band = raw.band,
        power = raw.tx_power,
        sf = raw.spreading_factor,
        bw = raw.signal_bandwidth,
        cr = raw.coding_rate_4,
        sync = raw.sync_word,
        id = raw.node_id,
    );

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("node_config.rs");
    fs::write(dest_path, code)?;
    Ok(())
}
