//! Room Directory
//!
//! Room は保存されるエンティティではなく、接続が保持している `room` の値から
//! 都度導出されるビューです。ここの関数はすべて副作用のない純粋関数です。
//!
//! どちらの関数も接続の全走査（O(n)）で計算します。単一プロセス・小規模な接続数を
//! 前提とした単純さを優先しており、規模が大きくなった場合は Room → 接続集合の
//! 逆引きインデックスを保持する実装に置き換えることになります。

use super::{Connection, RoomName};

/// 指定した Room に所属している接続を、レジストリの順序のまま返す
pub fn members_of(connections: &[Connection], room: &RoomName) -> Vec<Connection> {
    connections
        .iter()
        .filter(|connection| &connection.room == room)
        .cloned()
        .collect()
}

/// 接続が参照している Room 名を重複なしで返す
///
/// 順序は最初に現れた順。
pub fn active_room_names(connections: &[Connection]) -> Vec<RoomName> {
    let mut rooms: Vec<RoomName> = Vec::new();
    for connection in connections {
        if !rooms.contains(&connection.room) {
            rooms.push(connection.room.clone());
        }
    }
    rooms
}
