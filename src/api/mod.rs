//! もぐらたたきWebAPI モジュール
//!
//! ゲームの作成・開始・停止・クリック操作をHTTP経由で提供する。

pub mod dto;
pub mod service;
pub mod handlers;
pub mod routes;
pub mod middleware;

pub use dto::*;
pub use service::*;
pub use routes::*;
