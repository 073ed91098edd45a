mod moex;

pub use moex::{MoexIssFeed, DEFAULT_BOARD, DEFAULT_ISS_BASE_URL};
