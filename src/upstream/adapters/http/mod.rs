//! `reqwest` adapters for the upstream ports.
//!
//! Each client carries its own request timeout. Payload decoding is exposed
//! as plain functions so it can be exercised without a network.

pub mod battle_net;
pub mod client;
pub mod raider_io;
pub mod sheets;
pub mod wow_quote;
pub mod youtube;

pub use battle_net::BattleNetClient;
pub use raider_io::RaiderIoClient;
pub use sheets::SheetsClient;
pub use wow_quote::WowQuoteClient;
pub use youtube::YouTubeClient;
