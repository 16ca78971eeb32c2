pub mod hiscores_utils;
pub mod http_utils;
