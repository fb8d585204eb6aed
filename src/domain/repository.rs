use super::model::library::Library;

/// 永続化層のエラー。データ破損かどうかを上位層に伝える。
pub trait StoreError: std::error::Error + Send + Sync + 'static {
    /// 保存済みデータが存在するが解釈できない場合に true。
    fn is_corrupt(&self) -> bool {
        false
    }
}

/// 永続化の抽象。Infra層が実装する。
pub trait LibraryRepository {
    type Error: StoreError;

    /// 保存済みの蔵書を読む。未保存なら空の `Library`。
    fn load(&self) -> Result<Library, Self::Error>;

    /// 蔵書全体で保存内容を置き換える。失敗時は以前の内容が残る。
    fn save(&self, library: &Library) -> Result<(), Self::Error>;
}
