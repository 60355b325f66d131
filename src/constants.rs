//! Well-known mainnet addresses, kept as hex strings so they can double as
//! CLI defaults.

// Ekubo protocol
pub const EKUBO_CORE: &str =
    "0x00000005dd3d2f4429af886cd1a3b08289dbcea99a294197e9eb43b0e0325b4b";
pub const EKUBO_POSITIONS: &str =
    "0x02e0af29598b407c8716b17f6d2795eca1b471413fa03fb145a5e33722184067";
pub const EKUBO_POSITIONS_NFT: &str =
    "0x07b696af58c967c1b14c9dde0ace001720635a660a8e90c565ea459345318b30";

// Tokens
pub const STRK: &str = "0x04718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d";
pub const XSTRK: &str = "0x028d709c875c0ceac3dce7065bec5328186dc89fe254527084d1689910954b0a";

pub const DEFAULT_FEE_COLLECTOR: &str =
    "0x06419f7dea356b74bc1443bd1600ab3831b7808d1ef897789facfad11a172da7";
