//! Value Objects
//!
//! 接続 ID・表示名・Room 名・本文はいずれも文字列の薄いラッパーです。
//! 空文字列の禁止などの入力制約はプレゼンテーション層の責務であり、
//! ここでは検証しません（空文字列も有効な値として扱います）。

use std::fmt;

use uuid::Uuid;

macro_rules! string_value_object {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_value_object!(
    /// トランスポート層が接続時に払い出す不透明な接続 ID
    ConnectionId
);

string_value_object!(
    /// ユーザーが入力する表示名（再入室でのみ変更される）
    DisplayName
);

string_value_object!(
    /// Room 名。少なくとも 1 つの接続が参照している間だけ Room は存在する
    RoomName
);

string_value_object!(
    /// メッセージ本文
    MessageText
);

impl ConnectionId {
    /// UUID v4 から新しい接続 ID を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl DisplayName {
    /// 管理者通知用の予約済み送信者名
    pub fn admin() -> Self {
        Self(super::ADMIN_NAME.to_string())
    }

    pub fn is_admin(&self) -> bool {
        self.0 == super::ADMIN_NAME
    }
}
