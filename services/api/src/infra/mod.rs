pub mod db;
pub mod oauth;
