/// Message Router の処理結果
///
/// 宛先が解決できないイベントは `Dropped` になります。送信者へは何も返さず、
/// 失敗としても扱いません。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// `recipients` 件のクライアントへ送信した
    Delivered { recipients: usize },
    /// 宛先が解決できず破棄した
    Dropped,
}

impl Delivery {
    pub fn is_dropped(&self) -> bool {
        matches!(self, Delivery::Dropped)
    }
}
