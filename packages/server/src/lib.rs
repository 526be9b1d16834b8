//! hiroba chat relay server
//!
//! 名前付きの Room に参加したクライアント同士で、メッセージ・個別メッセージ・入力中通知を
//! WebSocket 経由で中継します。Room ごとに直近のメッセージ履歴を保持し、
//! 入室したクライアントへ再送します。
//!
//! - `domain`: 接続レジストリ・履歴バッファ・通知などのドメインモデル
//! - `usecase`: 入力イベントごとの処理と、イベントを直列に処理する `EventDispatcher`
//! - `infrastructure`: ワイヤーフォーマット（DTO）、WebSocket への送信、インメモリ Repository
//! - `ui`: axum による WebSocket / HTTP エンドポイント

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
